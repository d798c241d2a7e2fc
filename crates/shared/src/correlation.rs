//! Correlation identifiers and request-scoped context.
//!
//! A `RequestContext` is what callers hand to the logger to tag every line
//! produced on behalf of one logical request. It carries:
//! - an optional, caller-supplied `CorrelationId`
//! - a process-unique identity token, assigned at construction and shared by
//!   every clone of the context
//!
//! The identity token is only meaningful inside the current process.

use crate::{ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A correlation identifier used for logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(Arc<str>);

impl CorrelationId {
    /// Parse a correlation identifier from user input.
    ///
    /// The value is trimmed; empty values are rejected.
    pub fn parse(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "correlationId must be non-empty",
            ));
        }
        Ok(Self(Arc::<str>::from(trimmed)))
    }

    /// Borrow the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

static CONTEXT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique identity of a `RequestContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    fn next() -> Self {
        Self(CONTEXT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "ctx_{}", self.0)
    }
}

/// Request-scoped context passed across boundaries.
#[derive(Debug, Clone)]
pub struct RequestContext {
    id: ContextId,
    correlation_id: Option<CorrelationId>,
}

impl RequestContext {
    /// Create an anonymous context; log lines are tagged with its identity token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ContextId::next(),
            correlation_id: None,
        }
    }

    /// Create a context tagged with an explicit correlation id.
    #[must_use]
    pub fn with_correlation_id(correlation_id: CorrelationId) -> Self {
        Self {
            id: ContextId::next(),
            correlation_id: Some(correlation_id),
        }
    }

    /// Return the correlation id, if one was supplied.
    #[must_use]
    pub const fn correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation_id.as_ref()
    }

    /// Return the identity token of this context.
    #[must_use]
    pub const fn id(&self) -> ContextId {
        self.id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
