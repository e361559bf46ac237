//! Structured logging.
//!
//! Uses the tracing crate; `RUST_LOG` wins over the configured level so a
//! deployment can be inspected without editing config.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the configured default level.
pub fn init(level: &str) {
    let default_directive = format!("defi_gateway={level},tower_http=info");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
