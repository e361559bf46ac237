//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → cors.rs (preflight short-circuit, response headers)
//!     → handlers.rs (route → endpoint kind → gateway engine)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
