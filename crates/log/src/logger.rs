//! Immutable, chainable loggers.

use crate::state::State;
use petal_ports::{CorrelationSource, Fields, Level};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Field holding the value passed to [`Logger::with_scope`].
pub const SCOPE_KEY: &str = "scope";
/// Field holding the error text passed to [`Logger::with_error`].
pub const ERROR_KEY: &str = "error";
/// Field holding the context identifier set by [`Logger::with_context`].
pub const CONTEXT_KEY: &str = "ctx";

/// A field snapshot bound to a [`State`].
///
/// Every `with_*` call returns a new logger; the receiver never changes, so a
/// base logger can be shared across threads and extended independently.
#[derive(Clone)]
pub struct Logger {
    state: State,
    fields: Arc<Fields>,
}

impl Logger {
    pub(crate) fn root(state: State) -> Self {
        Self {
            state,
            fields: Arc::new(Fields::new()),
        }
    }

    /// Categorise messages under `scope`.
    #[must_use]
    pub fn with_scope(&self, scope: &str) -> Self {
        self.with_field(SCOPE_KEY, scope)
    }

    /// Attach the display text of `error`.
    #[must_use]
    pub fn with_error<E>(&self, error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.with_field(ERROR_KEY, error.to_string())
    }

    /// Attach a request context.
    ///
    /// The context's correlation id is used when present, otherwise its
    /// identity token. `None` returns a logger sharing this one's fields.
    #[must_use]
    pub fn with_context<C>(&self, context: Option<&C>) -> Self
    where
        C: CorrelationSource + ?Sized,
    {
        let Some(context) = context else {
            return self.clone();
        };
        let id = context.correlation_id().map_or_else(
            || context.identity_token(),
            |correlation_id| correlation_id.as_str().to_string(),
        );
        self.with_field(CONTEXT_KEY, id)
    }

    /// Merge `fields` over the current ones; later keys win.
    #[must_use]
    pub fn with_fields<I, K, V>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut merged = Fields::clone(&self.fields);
        merged.extend(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        self.derive(merged)
    }

    /// Set a single field.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut merged = Fields::clone(&self.fields);
        merged.insert(key.into(), value.into());
        self.derive(merged)
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.state.emit(Level::Debug, &self.fields, message);
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.state.emit(Level::Info, &self.fields, message);
    }

    /// Fields attached to this logger.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns true when both loggers share the same field allocation.
    pub fn shares_fields_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    fn derive(&self, fields: Fields) -> Self {
        Self {
            state: self.state.clone(),
            fields: Arc::new(fields),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
