//! Normalized upstream call outcomes.

use serde_json::Value;

/// How an upstream call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// The upstream answered with a non-2xx status and a body.
    RemoteRejected,
    /// The request was sent but no response arrived (network error, timeout).
    NoResponse,
    /// The request could not be constructed or sent at all.
    RequestSetupFailed,
}

/// Result of one upstream call. Exactly one variant holds; `status` is absent
/// only when the request never left the gateway.
#[derive(Debug, Clone)]
pub enum UpstreamOutcome {
    Success {
        status: u16,
        body: Value,
    },
    Failure {
        kind: UpstreamErrorKind,
        status: Option<u16>,
        details: Value,
    },
}

impl UpstreamOutcome {
    pub fn setup_failed(details: impl Into<String>) -> Self {
        UpstreamOutcome::Failure {
            kind: UpstreamErrorKind::RequestSetupFailed,
            status: None,
            details: Value::String(details.into()),
        }
    }

    pub fn no_response(details: impl Into<String>) -> Self {
        UpstreamOutcome::Failure {
            kind: UpstreamErrorKind::NoResponse,
            status: None,
            details: Value::String(details.into()),
        }
    }

    pub fn rejected(status: u16, details: Value) -> Self {
        UpstreamOutcome::Failure {
            kind: UpstreamErrorKind::RemoteRejected,
            status: Some(status),
            details,
        }
    }
}
