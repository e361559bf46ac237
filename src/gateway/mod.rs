//! The request-normalization / upstream-dispatch / error-mapping engine.
//!
//! # Data Flow
//! ```text
//! inbound query
//!     → params.rs   (resolve aliases and defaults into a RequestDescriptor)
//!     → validate.rs (required fields, enumerated values — fail fast)
//!     → builder.rs  (upstream URL, query renames, credential placement)
//!     → upstream    (single bounded GET, classified outcome)
//!     → shape.rs    (client-facing schema)
//! ```
//!
//! Any stage can short-circuit into `error.rs`'s taxonomy; `dispatch.rs`
//! drives the pipeline for each endpoint kind.

pub mod builder;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod params;
pub mod shape;
pub mod validate;

pub use dispatch::GatewayDispatcher;
pub use endpoint::EndpointKind;
pub use error::GatewayError;
pub use params::RequestDescriptor;
