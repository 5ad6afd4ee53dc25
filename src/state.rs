use crate::config::Config;
use crate::upstream::UpstreamClient;
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub api: Option<UpstreamClient>,
    pub admin: Option<UpstreamClient>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Mount an upstream for every sub-application that has a URL configured
    pub fn from_config(config: Config) -> Result<Self> {
        let api = config
            .api_upstream_url
            .clone()
            .map(|url| UpstreamClient::new("api", url, config.upstream_timeout))
            .transpose()?;

        let admin = config
            .admin_upstream_url
            .clone()
            .map(|url| UpstreamClient::new("admin", url, config.upstream_timeout))
            .transpose()?;

        Ok(AppState {
            api,
            admin,
            config: Arc::new(config),
        })
    }
}
