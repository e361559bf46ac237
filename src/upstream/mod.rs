//! Upstream dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamRequest (built by the gateway engine)
//!     → client.rs (single bounded GET, credential injected)
//!     → outcome.rs (Success | classified Failure)
//! ```

pub mod client;
pub mod outcome;
pub mod request;

pub use client::UpstreamClient;
pub use outcome::{UpstreamErrorKind, UpstreamOutcome};
pub use request::UpstreamRequest;
