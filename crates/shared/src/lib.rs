//! # petal-shared
//!
//! Shared error handling and correlation primitives for the petal workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Result and error envelope types
//! - Correlation identifiers and request-scoped context
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - Error envelopes serialize for machine consumers

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod correlation;
pub mod errors;
pub mod result;

pub use correlation::{ContextId, CorrelationId, RequestContext};
pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
