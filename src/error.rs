use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for requests this service answers itself
///
/// Responses relayed from an upstream never pass through here; only
/// failures of the routing layer do. Each variant maps to one HTTP status
/// and is rendered as an `ErrorResponse` JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// The named mount has no upstream configured
    SubAppNotConfigured(&'static str),
    /// Request body exceeded the forwarding limit (bytes)
    PayloadTooLarge(usize),
    /// Request body could not be read
    InvalidRequest(String),
    /// The named upstream did not answer in time
    UpstreamTimeout(&'static str),
    /// The named upstream could not be reached or broke the exchange
    UpstreamUnavailable(&'static str),
    /// No route matched
    NotFound(Method, String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::SubAppNotConfigured(name) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{} sub-application is not configured", name),
            ),
            ApiError::PayloadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Request body exceeds the {} byte limit", limit),
            ),
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request: {}", msg),
            ),
            ApiError::UpstreamTimeout(name) => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("{} upstream timed out", name),
            ),
            ApiError::UpstreamUnavailable(name) => (
                StatusCode::BAD_GATEWAY,
                format!("{} upstream is unavailable", name),
            ),
            ApiError::NotFound(method, path) => (
                StatusCode::NOT_FOUND,
                format!("No route matches {} {}", method, path),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl ApiError {
    /// Classify a transport failure talking to the named upstream
    ///
    /// The client only sees the mount name; the upstream address stays in
    /// the logs.
    pub fn from_upstream(name: &'static str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::UpstreamTimeout(name)
        } else {
            ApiError::UpstreamUnavailable(name)
        }
    }
}
