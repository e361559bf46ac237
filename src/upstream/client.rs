//! Upstream HTTP client with bounded timeout and outcome classification.
//!
//! One GET per gateway request, no retries: the upstream is a third-party
//! service with its own rate limits, and masking its failures with invisible
//! retries would hide quota exhaustion from clients.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::TimeoutConfig;
use crate::upstream::outcome::UpstreamOutcome;
use crate::upstream::request::UpstreamRequest;

/// Shared HTTP client for upstream calls.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build the client with connect and total-request timeouts from config.
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(timeouts: &TimeoutConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()?;
        Ok(Self { http })
    }

    /// Issue the request and classify the result.
    pub async fn fetch(&self, request: UpstreamRequest) -> UpstreamOutcome {
        let mut builder = self
            .http
            .get(request.url.clone())
            .header(ACCEPT, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => {
                tracing::error!(url = %request.url, error = %e, "upstream request could not be built");
                return UpstreamOutcome::setup_failed(e.to_string());
            }
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "no response from upstream");
                return UpstreamOutcome::no_response(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => decode_body(&bytes),
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "upstream response body was cut short");
                return UpstreamOutcome::no_response(e.to_string());
            }
        };

        if (200..300).contains(&status) {
            UpstreamOutcome::Success { status, body }
        } else {
            tracing::warn!(url = %request.url, status, "upstream rejected the request");
            UpstreamOutcome::rejected(status, body)
        }
    }
}

/// Parse the body as JSON; a non-JSON body is carried through as a string so
/// the gateway never drops upstream diagnostics.
fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_bodies_decode_structurally() {
        assert_eq!(decode_body(br#"{"balances":[]}"#), json!({ "balances": [] }));
    }

    #[test]
    fn non_json_bodies_are_preserved_as_strings() {
        assert_eq!(decode_body(b"<html>teapot</html>"), json!("<html>teapot</html>"));
    }

    #[test]
    fn empty_bodies_decode_to_an_empty_string() {
        assert_eq!(decode_body(b""), json!(""));
    }
}
