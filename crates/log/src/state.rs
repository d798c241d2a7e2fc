//! Shared logging configuration and dispatch.

use crate::logger::Logger;
use petal_adapters::{FileWriter, FormatWriter, StderrLogSink};
use petal_config::ValidatedLogConfig;
use petal_ports::{CorrelationSource, Fields, Flags, Level, SharedSink, Writer};
use petal_shared::Result;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Handle to a logging configuration: threshold, format options, output
/// destination, and the internal and external writers.
///
/// Clones share the same configuration. Builder methods mutate it in place
/// and return `&Self` so calls can be chained:
///
/// ```
/// use petal_log::{Flags, Level, State};
///
/// let state = State::new();
/// state.with_level(Level::Debug).with_flags(Flags::JSON);
/// assert_eq!(state.level(), Level::Debug);
/// ```
///
/// A `State` also acts as the root [`Logger`], carrying no fields.
#[derive(Clone)]
pub struct State {
    inner: Arc<RwLock<StateConfig>>,
}

struct StateConfig {
    level: Level,
    flags: Flags,
    output: Option<SharedSink>,
    internal: Arc<dyn Writer>,
    external: Option<Arc<dyn Writer>>,
}

impl State {
    /// Fresh state: `Info` threshold, [`Flags::STD`], text output on stderr.
    #[must_use]
    pub fn new() -> Self {
        let output: SharedSink = Arc::new(StderrLogSink);
        let flags = Flags::STD;
        Self {
            inner: Arc::new(RwLock::new(StateConfig {
                level: Level::Info,
                flags,
                internal: Arc::new(FormatWriter::new(Some(Arc::clone(&output)), flags)),
                output: Some(output),
                external: None,
            })),
        }
    }

    /// Build a state from a validated config.
    ///
    /// A configured `file` is opened (truncated) and attached as the
    /// external writer.
    pub fn from_config(config: &ValidatedLogConfig) -> Result<Self> {
        let state = Self::new();
        state.with_level(config.level()).with_flags(config.flags());
        if let Some(path) = config.file() {
            let file: Arc<dyn Writer> = Arc::new(FileWriter::create(path)?);
            state.with_external(Some(file));
        }
        Ok(state)
    }

    /// Set the format options and push them to both writers.
    pub fn with_flags(&self, flags: Flags) -> &Self {
        let mut config = self.write();
        config.flags = flags;
        config.internal.set_flags(flags);
        if let Some(external) = config.external.as_ref() {
            external.set_flags(flags);
        }
        drop(config);
        self
    }

    /// Set the threshold; events below it are discarded before any writer runs.
    pub fn with_level(&self, level: Level) -> &Self {
        self.write().level = level;
        self
    }

    /// Redirect the internal writer. `None` disables its output.
    pub fn with_output(&self, output: Option<SharedSink>) -> &Self {
        let mut config = self.write();
        config.internal.set_output(output.clone());
        config.output = output;
        drop(config);
        self
    }

    /// Replace the internal writer.
    ///
    /// The writer keeps its own flags and output until the next
    /// [`with_flags`](Self::with_flags) or [`with_output`](Self::with_output).
    pub fn with_internal(&self, writer: Arc<dyn Writer>) -> &Self {
        self.write().internal = writer;
        self
    }

    /// Attach (or with `None`, detach) the external writer.
    pub fn with_external(&self, writer: Option<Arc<dyn Writer>>) -> &Self {
        self.write().external = writer;
        self
    }

    /// Deliver an event to the internal writer, then the external one.
    ///
    /// No threshold check happens here.
    pub fn dispatch(&self, level: Level, fields: &Fields, message: &str) {
        self.read().deliver(level, fields, message);
    }

    /// Threshold check followed by dispatch, under a single read lock.
    pub(crate) fn emit(&self, level: Level, fields: &Fields, message: &str) {
        let config = self.read();
        if level.passes(config.level) {
            config.deliver(level, fields, message);
        }
    }

    /// Flush the internal writer, then the external one.
    pub fn flush(&self) {
        let config = self.read();
        config.internal.flush();
        if let Some(external) = config.external.as_ref() {
            external.flush();
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        self.read().level
    }

    /// Current format options.
    pub fn flags(&self) -> Flags {
        self.read().flags
    }

    /// Destination last passed to [`with_output`](Self::with_output).
    pub fn output(&self) -> Option<SharedSink> {
        self.read().output.clone()
    }

    /// Returns true when an external writer is attached.
    pub fn has_external(&self) -> bool {
        self.read().external.is_some()
    }

    /// Root logger bound to this state.
    pub fn logger(&self) -> Logger {
        Logger::root(self.clone())
    }

    /// See [`Logger::with_scope`].
    pub fn with_scope(&self, scope: &str) -> Logger {
        self.logger().with_scope(scope)
    }

    /// See [`Logger::with_error`].
    pub fn with_error<E>(&self, error: &E) -> Logger
    where
        E: std::error::Error + ?Sized,
    {
        self.logger().with_error(error)
    }

    /// See [`Logger::with_context`].
    pub fn with_context<C>(&self, context: Option<&C>) -> Logger
    where
        C: CorrelationSource + ?Sized,
    {
        self.logger().with_context(context)
    }

    /// See [`Logger::with_fields`].
    pub fn with_fields<I, K, V>(&self, fields: I) -> Logger
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.logger().with_fields(fields)
    }

    /// See [`Logger::with_field`].
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Logger {
        self.logger().with_field(key, value)
    }

    /// Log a debug message without fields.
    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, &Fields::new(), message);
    }

    /// Log an info message without fields.
    pub fn info(&self, message: &str) {
        self.emit(Level::Info, &Fields::new(), message);
    }

    fn read(&self) -> RwLockReadGuard<'_, StateConfig> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StateConfig> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateConfig {
    fn deliver(&self, level: Level, fields: &Fields, message: &str) {
        self.internal.log(level, fields, message);
        if let Some(external) = self.external.as_ref() {
            external.log(level, fields, message);
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for State {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.read();
        formatter
            .debug_struct("State")
            .field("level", &config.level)
            .field("flags", &config.flags)
            .field("has_output", &config.output.is_some())
            .field("has_external", &config.external.is_some())
            .finish()
    }
}
