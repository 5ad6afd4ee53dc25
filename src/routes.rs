// Route path constants - single source of truth for all mounted paths

pub const ROOT: &str = "/";
pub const HEALTH: &str = "/health";
pub const DOCS: &str = "/docs";
pub const OPENAPI_JSON: &str = "/openapi.json";

// Sub-application mount prefixes, registered without the trailing slash
pub const ADMIN: &str = "/admin";
pub const API: &str = "/api";

// Endpoint templates advertised by the root document. They are served by
// the api sub-application, not by this router.
pub const SEARCH_ENDPOINT: &str = "/api/search/";
pub const MOVIES_ENDPOINT: &str = "/api/movies/{id}/";
pub const TV_ENDPOINT: &str = "/api/tv/{id}/";
pub const TRENDING_ENDPOINT: &str = "/api/trending/";
pub const DISCOVER_ENDPOINT: &str = "/api/discover/";
pub const WATCHLIST_ENDPOINT: &str = "/api/watchlist/";
