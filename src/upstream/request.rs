//! Prepared upstream request.

use std::fmt;

use url::Url;

/// A fully-built upstream GET: URL with query encoded, plus the optional
/// bearer credential injected at send time.
#[derive(Clone)]
pub struct UpstreamRequest {
    pub url: Url,
    pub bearer: Option<String>,
}

impl UpstreamRequest {
    pub fn new(url: Url) -> Self {
        Self { url, bearer: None }
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

// The credential must never reach logs, so Debug redacts it.
impl fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamRequest")
            .field("url", &self.url.as_str())
            .field("bearer", &self.bearer.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
