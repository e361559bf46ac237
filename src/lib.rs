//! DeFi-data aggregation gateway library.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod upstream;

pub use config::GatewayConfig;
pub use gateway::{EndpointKind, GatewayDispatcher, GatewayError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
