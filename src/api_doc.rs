use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{EndpointCatalog, HealthResponse, RootResponse, UnhealthyResponse};

/// OpenAPI documentation
///
/// Covers only what this service answers itself. Paths under `/api/` and
/// `/admin/` belong to the mounted sub-applications.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MovieMind API",
        version = "1.0.0",
        description = "Routing front for MovieMind movie and TV search and discovery"
    ),
    paths(
        handlers::root::root_handler,
        handlers::health::health_handler
    ),
    components(
        schemas(
            RootResponse,
            EndpointCatalog,
            HealthResponse,
            UnhealthyResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "root", description = "Service description"),
        (name = "health", description = "Health check operations")
    )
)]
pub struct ApiDoc;
