//! # petal-ports
//!
//! Port traits for the petal hexagonal architecture.
//!
//! This crate defines the contracts between the logging facade and the
//! concrete writers and sinks. It depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod correlation;
pub mod flags;
pub mod level;
pub mod log_sink;
pub mod writer;

pub use correlation::*;
pub use flags::*;
pub use level::*;
pub use log_sink::*;
pub use writer::*;

// Re-export the correlation types used in port signatures, so adapter crates
// can implement ports without directly depending on `petal-shared`.
pub use petal_shared::{CorrelationId, RequestContext};
