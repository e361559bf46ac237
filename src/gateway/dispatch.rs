//! Request orchestration.
//!
//! One engine serves every proxied route: resolve parameters, validate,
//! check credentials, build the upstream request, fetch, shape. A failure at
//! any stage short-circuits into the classified error; the upstream is never
//! called for a request that is already known to fail.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::gateway::builder::build_upstream_request;
use crate::gateway::endpoint::EndpointKind;
use crate::gateway::error::GatewayError;
use crate::gateway::params::resolve;
use crate::gateway::shape::shape_response;
use crate::gateway::validate::validate;
use crate::observability::metrics;
use crate::upstream::{UpstreamClient, UpstreamErrorKind, UpstreamOutcome};

/// The endpoint-kind-parameterized proxy engine.
#[derive(Debug, Clone)]
pub struct GatewayDispatcher {
    config: Arc<GatewayConfig>,
    upstream: UpstreamClient,
}

impl GatewayDispatcher {
    /// Build the dispatcher and its upstream client.
    pub fn new(config: Arc<GatewayConfig>) -> reqwest::Result<Self> {
        let upstream = UpstreamClient::new(&config.timeouts)?;
        Ok(Self { config, upstream })
    }

    /// Handle one inbound request for `kind`, producing the final response.
    pub async fn handle(
        &self,
        kind: EndpointKind,
        query: &HashMap<String, String>,
    ) -> (StatusCode, Json<Value>) {
        let start = Instant::now();

        match self.process(kind, query).await {
            Ok(body) => {
                tracing::debug!(endpoint = kind.label(), "request proxied");
                metrics::record_request(kind.label(), StatusCode::OK.as_u16(), start);
                (StatusCode::OK, Json(body))
            }
            Err(error) => {
                let status = error.status();
                tracing::warn!(
                    endpoint = kind.label(),
                    status = status.as_u16(),
                    error = %error,
                    "request failed"
                );
                metrics::record_request(kind.label(), status.as_u16(), start);
                (status, Json(error.body()))
            }
        }
    }

    async fn process(
        &self,
        kind: EndpointKind,
        query: &HashMap<String, String>,
    ) -> Result<Value, GatewayError> {
        let descriptor = resolve(kind, query);
        validate(kind, &descriptor)?;

        let credential = self.credential_for(kind)?;
        let request = build_upstream_request(kind, &descriptor, &self.config.upstream, credential)?;

        match self.upstream.fetch(request).await {
            UpstreamOutcome::Success { body, .. } => Ok(shape_response(kind, &descriptor, body)),
            UpstreamOutcome::Failure { kind: error_kind, status, details } => {
                Err(classify_failure(kind, error_kind, status, details))
            }
        }
    }

    /// The credential an endpoint kind authenticates with. Checked before
    /// any upstream work so a misconfigured deployment fails fast.
    fn credential_for(&self, kind: EndpointKind) -> Result<&str, GatewayError> {
        let (credential, variable) = match kind {
            EndpointKind::News => (&self.config.credentials.news_api_key, "NEWS_API_KEY"),
            _ => (&self.config.credentials.api_auth_token, "API_AUTH_TOKEN"),
        };
        credential
            .as_deref()
            .ok_or(GatewayError::CredentialMissing { variable })
    }
}

fn classify_failure(
    kind: EndpointKind,
    error_kind: UpstreamErrorKind,
    status: Option<u16>,
    details: Value,
) -> GatewayError {
    let message = kind.failure_message();
    match error_kind {
        UpstreamErrorKind::RemoteRejected => GatewayError::RemoteRejected {
            message,
            status: status.unwrap_or(500),
            details,
        },
        UpstreamErrorKind::NoResponse => GatewayError::NoResponse {
            message,
            details: details_text(details),
        },
        UpstreamErrorKind::RequestSetupFailed => GatewayError::RequestSetupFailed {
            message,
            details: details_text(details),
        },
    }
}

fn details_text(details: Value) -> String {
    match details {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher_with(credentials: crate::config::Credentials) -> GatewayDispatcher {
        let mut config = GatewayConfig::default();
        config.credentials = credentials;
        GatewayDispatcher::new(Arc::new(config)).expect("client builds")
    }

    #[tokio::test]
    async fn missing_parameter_fails_before_any_upstream_work() {
        let dispatcher = dispatcher_with(crate::config::Credentials {
            api_auth_token: Some("tok".into()),
            news_api_key: None,
        });
        let (status, Json(body)) = dispatcher
            .handle(EndpointKind::Balance, &HashMap::new())
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Missing required parameter. Please provide walletAddress."
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_upstream_work() {
        let dispatcher = dispatcher_with(crate::config::Credentials::default());
        let query: HashMap<String, String> =
            [("walletAddress".to_string(), "0x1".to_string())].into();
        let (status, Json(body)) = dispatcher.handle(EndpointKind::Balance, &query).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "API key not configured. Please set the API_AUTH_TOKEN environment variable."
        );
    }

    #[tokio::test]
    async fn news_uses_its_own_credential() {
        let dispatcher = dispatcher_with(crate::config::Credentials {
            api_auth_token: Some("tok".into()),
            news_api_key: None,
        });
        let (status, Json(body)) = dispatcher.handle(EndpointKind::News, &HashMap::new()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "API key not configured. Please set the NEWS_API_KEY environment variable."
        );
    }

    #[test]
    fn failure_classification_covers_every_kind() {
        let rejected = classify_failure(
            EndpointKind::Balance,
            UpstreamErrorKind::RemoteRejected,
            Some(404),
            serde_json::json!({ "description": "no" }),
        );
        assert!(matches!(rejected, GatewayError::RemoteRejected { status: 404, .. }));

        let timeout = classify_failure(
            EndpointKind::Balance,
            UpstreamErrorKind::NoResponse,
            None,
            Value::String("timed out".into()),
        );
        assert!(matches!(timeout, GatewayError::NoResponse { .. }));

        let setup = classify_failure(
            EndpointKind::Balance,
            UpstreamErrorKind::RequestSetupFailed,
            None,
            Value::String("bad url".into()),
        );
        assert!(matches!(setup, GatewayError::RequestSetupFailed { .. }));
    }
}
