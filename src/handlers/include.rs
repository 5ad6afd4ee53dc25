use crate::error::ApiError;
use crate::state::AppState;
use crate::upstream::{UpstreamClient, strip_hop_by_hop};
use axum::{
    body::{Body, Bytes},
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::Response,
};

/// Largest request body forwarded to a sub-application (2.5 MiB)
pub const MAX_BODY_BYTES: usize = 2_621_440;

/// /api/** handler - Hand the request to the api sub-application
pub async fn api_include_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let upstream = state.api.as_ref().ok_or(ApiError::SubAppNotConfigured("api"))?;
    forward(upstream, method, uri, headers, body).await
}

/// /admin/** handler - Hand the request to the admin site
pub async fn admin_include_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let upstream = state
        .admin
        .as_ref()
        .ok_or(ApiError::SubAppNotConfigured("admin"))?;
    forward(upstream, method, uri, headers, body).await
}

async fn forward(
    upstream: &UpstreamClient,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let name = upstream.name();
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(MAX_BODY_BYTES)
        } else {
            ApiError::InvalidRequest(rejection.body_text())
        }
    })?;

    let mut outgoing = strip_hop_by_hop(&headers);
    outgoing.remove(header::HOST);
    outgoing.remove(header::CONTENT_LENGTH);
    if let Some(host) = headers.get(header::HOST) {
        outgoing.insert("x-forwarded-host", host.clone());
    }
    outgoing.insert("x-forwarded-proto", HeaderValue::from_static("http"));

    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let upstream_response = upstream
        .forward(method.clone(), path_and_query, outgoing, body)
        .await
        .map_err(|e| {
            tracing::warn!("{} {} to {} upstream failed: {}", method, path_and_query, name, e);
            ApiError::from_upstream(name, &e)
        })?;

    let status = upstream_response.status();
    let mut relayed_headers = strip_hop_by_hop(upstream_response.headers());
    relayed_headers.remove(header::CONTENT_LENGTH);

    tracing::info!(
        "{} {} -> {} upstream answered {}",
        method,
        path_and_query,
        name,
        status
    );

    // Relayed as a stream; a failure after this point aborts the response body
    let payload = Body::from_stream(upstream_response.bytes_stream());

    let mut response = Response::new(payload);
    *response.status_mut() = status;
    *response.headers_mut() = relayed_headers;
    Ok(response)
}
