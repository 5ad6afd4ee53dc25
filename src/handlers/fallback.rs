use crate::error::ApiError;
use axum::http::{Method, Uri};

/// Fallback handler - Anything the route table does not match
pub async fn not_found_handler(method: Method, uri: Uri) -> ApiError {
    tracing::debug!("No route for {} {}", method, uri.path());
    ApiError::NotFound(method, uri.path().to_string())
}
