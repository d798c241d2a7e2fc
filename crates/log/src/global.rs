//! Process-wide default state and the top-level convenience functions.
//!
//! The default is created lazily with [`State::new`]. Install a configured
//! state once at startup with [`set_default`]; replacing it later only
//! affects loggers obtained afterwards.

use crate::logger::Logger;
use crate::state::State;
use petal_ports::CorrelationSource;
use serde_json::Value;
use std::sync::{LazyLock, PoisonError, RwLock};

static DEFAULT_STATE: LazyLock<RwLock<State>> = LazyLock::new(|| RwLock::new(State::new()));

/// Replace the default state wholesale.
pub fn set_default(state: State) {
    *DEFAULT_STATE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = state;
}

/// Handle to the current default state.
pub fn default_state() -> State {
    DEFAULT_STATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Flush the default state's writers.
pub fn flush() {
    default_state().flush();
}

/// Root logger of the default state, scoped.
pub fn with_scope(scope: &str) -> Logger {
    default_state().with_scope(scope)
}

/// Root logger of the default state, carrying `error`.
pub fn with_error<E>(error: &E) -> Logger
where
    E: std::error::Error + ?Sized,
{
    default_state().with_error(error)
}

/// Root logger of the default state, carrying `context`.
pub fn with_context<C>(context: Option<&C>) -> Logger
where
    C: CorrelationSource + ?Sized,
{
    default_state().with_context(context)
}

/// Root logger of the default state, carrying `fields`.
pub fn with_fields<I, K, V>(fields: I) -> Logger
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    default_state().with_fields(fields)
}

/// Root logger of the default state, carrying one field.
pub fn with_field(key: impl Into<String>, value: impl Into<Value>) -> Logger {
    default_state().with_field(key, value)
}

/// Debug message on the default state.
pub fn debug(message: &str) {
    default_state().debug(message);
}

/// Info message on the default state.
pub fn info(message: &str) {
    default_state().info(message);
}
