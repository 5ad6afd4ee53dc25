use serde::{Deserialize, Serialize};

use crate::routes;

pub const API_MESSAGE: &str = "MovieMind API";
pub const API_VERSION: &str = "1.0.0";

/// Response type for the root endpoint
///
/// A fixed description of the service. Nothing in it is derived from
/// configuration or from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RootResponse {
    #[schema(example = "MovieMind API")]
    pub message: String,
    #[schema(example = "1.0.0")]
    pub version: String,
    pub endpoints: EndpointCatalog,
}

/// Logical endpoint name to path template, served by the api sub-application
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EndpointCatalog {
    #[schema(example = "/api/search/")]
    pub search: String,
    #[schema(example = "/api/movies/{id}/")]
    pub movies: String,
    #[schema(example = "/api/tv/{id}/")]
    pub tv: String,
    #[schema(example = "/api/trending/")]
    pub trending: String,
    #[schema(example = "/api/discover/")]
    pub discover: String,
    #[schema(example = "/api/watchlist/")]
    pub watchlist: String,
}

impl RootResponse {
    pub fn api_root() -> Self {
        RootResponse {
            message: API_MESSAGE.to_string(),
            version: API_VERSION.to_string(),
            endpoints: EndpointCatalog {
                search: routes::SEARCH_ENDPOINT.to_string(),
                movies: routes::MOVIES_ENDPOINT.to_string(),
                tv: routes::TV_ENDPOINT.to_string(),
                trending: routes::TRENDING_ENDPOINT.to_string(),
                discover: routes::DISCOVER_ENDPOINT.to_string(),
                watchlist: routes::WATCHLIST_ENDPOINT.to_string(),
            },
        }
    }
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}
