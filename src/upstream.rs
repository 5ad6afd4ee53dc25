use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, Method, header};
use reqwest::Url;
use reqwest::redirect::Policy;

/// Headers that describe a single connection and are never forwarded
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Shareable HTTP client bound to the external service behind one mount
///
/// A mount (`/api/`, `/admin/`) hands every request under its prefix to the
/// service at `base_url`. Paths are appended unchanged, so the upstream sees
/// the same `/api/...` path the client asked for.
#[derive(Clone)]
pub struct UpstreamClient {
    name: &'static str,
    base_url: Url,
    inner: reqwest::Client,
}

impl UpstreamClient {
    /// Create a client for the named mount
    ///
    /// Redirects are not followed: a `302` from the upstream is relayed to the
    /// caller as-is, the same as any other response.
    pub fn new(name: &'static str, base_url: Url, timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .with_context(|| format!("Failed to build HTTP client for {} upstream", name))?;

        tracing::info!("Mounted {} upstream at: {}", name, base_url);

        Ok(Self {
            name,
            base_url,
            inner,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Absolute upstream URL for an incoming path and query
    pub fn target_url(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            path_and_query
        )
    }

    /// Send one request to the upstream and return its raw response
    ///
    /// `headers` must already be stripped of hop-by-hop headers.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = self.target_url(path_and_query);
        tracing::debug!("Forwarding {} {} to {} upstream", method, url, self.name);

        self.inner
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await
    }

    /// Verify the upstream answers HTTP at its base URL
    ///
    /// Any response counts, including error statuses; only transport
    /// failures make the upstream unhealthy.
    pub async fn health_check(&self) -> Result<()> {
        let response = self
            .inner
            .get(self.base_url.clone())
            .send()
            .await
            .with_context(|| format!("{} upstream at {} is unreachable", self.name, self.base_url))?;

        tracing::debug!(
            "{} upstream health probe answered {}",
            self.name,
            response.status()
        );
        Ok(())
    }
}

/// Copy `headers`, dropping hop-by-hop headers
///
/// Besides the fixed list, any header named in a `Connection` value is
/// connection-scoped too and is dropped with it.
pub fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let connection_scoped: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    let mut stripped = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if HOP_BY_HOP.contains(&name.as_str()) || connection_scoped.contains(name) {
            continue;
        }
        stripped.append(name.clone(), value.clone());
    }
    stripped
}
