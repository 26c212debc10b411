//! fmgen-logging - Tracing integration for the generator
//!
//! This crate provides:
//! - [`TracingSink`] diagnostics sink that forwards to `tracing` events
//! - [`init_logging`] subscriber setup honouring `RUST_LOG`

mod sink;
mod subscriber;

pub use fmgen_core::LogLevel;
pub use sink::{TARGET, TracingSink};
pub use subscriber::{init_logging, level_filter, log_level_of};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, TracingSink, init_logging};
}
