use crate::models::RootResponse;
use crate::routes;
use axum::Json;

/// / handler - Describe the API
///
/// Answers every method with the same fixed document listing the
/// endpoints of the api sub-application. It never fails.
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Service description", body = RootResponse)
    ),
    tag = "root"
)]
pub async fn root_handler() -> Json<RootResponse> {
    tracing::debug!("Serving API root document");
    Json(RootResponse::api_root())
}
