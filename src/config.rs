use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;
use reqwest::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub api_upstream_url: Option<Url>,
    pub admin_upstream_url: Option<Url>,
    pub upstream_timeout: Duration,
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes the process environment; tests pass a map so they
    /// never race on global state.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let api_upstream_url = lookup("API_UPSTREAM_URL")
            .map(|raw| parse_upstream_url("API_UPSTREAM_URL", &raw))
            .transpose()?;

        let admin_upstream_url = lookup("ADMIN_UPSTREAM_URL")
            .map(|raw| parse_upstream_url("ADMIN_UPSTREAM_URL", &raw))
            .transpose()?;

        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?;
        if timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Config {
            service_port,
            service_host,
            api_upstream_url,
            admin_upstream_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            cors_allowed_origins,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
        tracing::info!(
            "  API upstream: {}",
            self.api_upstream_url.as_ref().map(Url::as_str).unwrap_or("not configured")
        );
        tracing::info!(
            "  Admin upstream: {}",
            self.admin_upstream_url.as_ref().map(Url::as_str).unwrap_or("not configured")
        );
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout.as_secs());
        if self.cors_allowed_origins.is_empty() {
            tracing::info!("  CORS: same-origin only");
        } else {
            tracing::info!("  CORS origins: {:?}", self.cors_allowed_origins);
        }
    }
}

fn parse_upstream_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("{} must be an absolute URL, got '{}'", name, raw))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        bail!("{} must be an http or https URL, got '{}'", name, raw);
    }

    Ok(url)
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| {
                format!("CORS_ALLOWED_ORIGINS contains an invalid origin: '{}'", origin)
            })
        })
        .collect()
}

#[cfg(test)]
impl Config {
    /// Local defaults with no upstreams mounted
    pub fn for_tests() -> Self {
        Config {
            service_port: 8000,
            service_host: "127.0.0.1".to_string(),
            api_upstream_url: None,
            admin_upstream_url: None,
            upstream_timeout: Duration::from_secs(5),
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_with_all_vars() {
        let config = config_from(&[
            ("SERVICE_PORT", "8080"),
            ("SERVICE_HOST", "127.0.0.1"),
            ("API_UPSTREAM_URL", "http://api.internal:9000"),
            ("ADMIN_UPSTREAM_URL", "https://admin.internal/"),
            ("UPSTREAM_TIMEOUT_SECS", "10"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, https://moviemind.app"),
        ])
        .unwrap();

        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(
            config.api_upstream_url.unwrap().as_str(),
            "http://api.internal:9000/"
        );
        assert_eq!(
            config.admin_upstream_url.unwrap().as_str(),
            "https://admin.internal/"
        );
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(
            config.cors_allowed_origins,
            vec![
                HeaderValue::from_static("http://localhost:5173"),
                HeaderValue::from_static("https://moviemind.app"),
            ]
        );
    }

    #[test]
    fn test_config_with_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.service_port, 8000);
        assert_eq!(config.service_host, "0.0.0.0");
        assert!(config.api_upstream_url.is_none());
        assert!(config.admin_upstream_url.is_none());
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_invalid_port() {
        let error = config_from(&[("SERVICE_PORT", "not-a-number")]).unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_port_out_of_range() {
        assert!(config_from(&[("SERVICE_PORT", "99999")]).is_err());
    }

    #[test]
    fn test_relative_upstream_url_rejected() {
        let error = config_from(&[("API_UPSTREAM_URL", "/api")]).unwrap_err();
        assert!(error.to_string().contains("API_UPSTREAM_URL"));
    }

    #[test]
    fn test_non_http_upstream_url_rejected() {
        let error = config_from(&[("ADMIN_UPSTREAM_URL", "ftp://files.internal")]).unwrap_err();
        assert!(error.to_string().contains("ADMIN_UPSTREAM_URL"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let error = config_from(&[("UPSTREAM_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(error.to_string().contains("UPSTREAM_TIMEOUT_SECS"));
    }

    #[test]
    fn test_blank_origins_are_ignored() {
        let config = config_from(&[("CORS_ALLOWED_ORIGINS", " , ")]).unwrap();
        assert!(config.cors_allowed_origins.is_empty());
    }
}
