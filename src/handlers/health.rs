use crate::models::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET /health handler - Health check endpoint
///
/// Probes the api upstream when one is mounted. Returns 200 OK if it is
/// reachable (or none is mounted), 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    let Some(api) = state.api.as_ref() else {
        tracing::debug!("Health check passed (no api upstream mounted)");
        return Ok(healthy());
    };

    match api.health_check().await {
        Ok(_) => {
            tracing::debug!("Health check passed");
            Ok(healthy())
        }
        Err(e) => {
            tracing::error!("Health check failed: {:#}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("{:#}", e),
                }),
            ))
        }
    }
}

fn healthy() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{Router, body::Body, http::Request, routing::get};
    use reqwest::Url;
    use tower::ServiceExt;

    fn setup_test_app(api_upstream: Option<&str>) -> Router {
        let config = Config {
            api_upstream_url: api_upstream.map(|url| Url::parse(url).unwrap()),
            ..Config::for_tests()
        };
        let state = AppState::from_config(config).expect("Failed to build state");

        Router::new()
            .route(routes::HEALTH, get(health_handler))
            .with_state(state)
    }

    async fn get_health(app: Router) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_without_upstream() {
        let (status, body) = get_health(setup_test_app(None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .create_async()
            .await;

        let (status, body) = get_health(setup_test_app(Some(server.url().as_str()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        // Nothing listens on port 1
        let (status, body) = get_health(setup_test_app(Some("http://127.0.0.1:1"))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let body: UnhealthyResponse = serde_json::from_value(body).unwrap();
        assert_eq!(body.status, "unhealthy");
        assert!(body.error.contains("unreachable"));
    }
}
