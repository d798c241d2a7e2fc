//! Typed access to the correlation carried by a request context.

use petal_shared::{CorrelationId, RequestContext};

/// A context object that can tag log lines for correlation.
pub trait CorrelationSource {
    /// Caller-supplied correlation id, when the context carries one.
    fn correlation_id(&self) -> Option<&CorrelationId>;

    /// Stable, process-local token identifying this context instance.
    ///
    /// Used in place of a correlation id; only comparable within one process.
    fn identity_token(&self) -> String;
}

impl CorrelationSource for RequestContext {
    fn correlation_id(&self) -> Option<&CorrelationId> {
        Self::correlation_id(self)
    }

    fn identity_token(&self) -> String {
        self.id().to_string()
    }
}
