use crate::api_doc::ApiDoc;
use crate::handlers::{
    admin_include_handler, api_include_handler, health_handler, include::MAX_BODY_BYTES,
    not_found_handler, root_handler,
};
use crate::routes;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{MethodRouter, any, get},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the full route table
///
/// `/` is the API root document, `/admin/` and `/api/` are sub-application
/// includes. Requests under an include prefix are never seen by the root
/// handler.
pub fn gen_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    let router = Router::new()
        .route(routes::ROOT, any(root_handler))
        .route(routes::HEALTH, get(health_handler));
    let router = include(router, routes::ADMIN, any(admin_include_handler));
    let router = include(router, routes::API, any(api_include_handler));

    router
        .merge(SwaggerUi::new(routes::DOCS).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Delegate everything under `prefix` to `handler`
///
/// Registers the bare prefix, the prefix with a trailing slash and every path
/// below it, for all methods.
pub fn include(
    router: Router<AppState>,
    prefix: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(prefix, handler.clone())
        .route(&format!("{}/", prefix), handler.clone())
        .route(&format!("{}/{{*path}}", prefix), handler)
}

fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods(Any)
        .allow_headers(Any)
}
