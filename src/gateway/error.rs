//! Gateway error taxonomy.
//!
//! Every failure the gateway can produce maps to exactly one variant here,
//! and every variant maps to one HTTP status and a JSON body carrying at
//! least `error` (and `details` for upstream failures). Client-visible
//! messages match what deployed clients already parse.

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Classified gateway failure.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required parameter was absent after resolution.
    #[error("Missing required parameter. Please provide {field}.")]
    MissingParameter { field: &'static str },

    /// A parameter was present but outside its allowed set.
    #[error("Invalid {field}. Must be one of: {allowed}")]
    InvalidEnumValue { field: &'static str, allowed: &'static str },

    /// The server-side credential for the upstream is not configured.
    #[error("API key not configured. Please set the {variable} environment variable.")]
    CredentialMissing { variable: &'static str },

    /// The upstream answered with a non-2xx status and a body.
    #[error("{message}")]
    RemoteRejected {
        message: &'static str,
        status: u16,
        details: Value,
    },

    /// The request was sent but no response arrived (network error, timeout).
    #[error("{message}")]
    NoResponse { message: &'static str, details: String },

    /// The upstream request could not be constructed or sent at all.
    #[error("{message}")]
    RequestSetupFailed { message: &'static str, details: String },
}

impl GatewayError {
    /// HTTP status returned to the client for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter { .. } | GatewayError::InvalidEnumValue { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::CredentialMissing { .. } | GatewayError::RequestSetupFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            // The upstream's own status is propagated verbatim so clients can
            // interpret upstream-specific error codes.
            GatewayError::RemoteRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            GatewayError::NoResponse { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// JSON body returned to the client for this failure.
    pub fn body(&self) -> Value {
        match self {
            GatewayError::MissingParameter { .. }
            | GatewayError::InvalidEnumValue { .. }
            | GatewayError::CredentialMissing { .. } => json!({ "error": self.to_string() }),
            GatewayError::RemoteRejected { message, details, .. } => {
                json!({ "error": message, "details": details })
            }
            GatewayError::NoResponse { message, details }
            | GatewayError::RequestSetupFailed { message, details } => {
                json!({ "error": message, "details": details })
            }
        }
    }
}
