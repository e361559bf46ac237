//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{Credentials, GatewayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, overlay credentials from the environment, and validate.
///
/// Without a file path the built-in defaults are used; credentials always
/// come from `API_AUTH_TOKEN` and `NEWS_API_KEY`.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config: GatewayConfig = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => GatewayConfig::default(),
    };

    config.credentials = credentials_from_env();
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read credentials from the process environment. Empty values count as
/// unset so a blank export does not masquerade as a configured key.
pub fn credentials_from_env() -> Credentials {
    Credentials {
        api_auth_token: env::var("API_AUTH_TOKEN").ok().filter(|v| !v.is_empty()),
        news_api_key: env::var("NEWS_API_KEY").ok().filter(|v| !v.is_empty()),
    }
}
