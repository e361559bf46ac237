//! Process lifecycle: graceful shutdown.

pub mod shutdown;

pub use shutdown::Shutdown;
