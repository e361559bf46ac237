//! Gateway configuration.
//!
//! # Responsibilities
//! - Define the config schema (serde over TOML)
//! - Load config files and overlay environment credentials
//! - Validate semantics before the config is accepted into the system

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{credentials_from_env, load_config, ConfigError};
pub use schema::{
    Credentials, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
