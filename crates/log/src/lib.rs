//! # petal-log
//!
//! Structured, leveled logging facade.
//!
//! A [`State`] holds the threshold, format options, output and the internal
//! and external [`Writer`]s. [`Logger`] values carry fields and are extended
//! with `with_*` calls that never mutate the receiver:
//!
//! ```
//! use std::sync::Arc;
//! use petal_log::{Flags, MemorySink, State};
//!
//! let sink = Arc::new(MemorySink::new());
//! let state = State::new();
//! state.with_flags(Flags::empty()).with_output(Some(sink.clone()));
//!
//! let base = state.with_scope("pkg");
//! base.with_field("num", 97).info("started");
//!
//! assert_eq!(sink.contents(), "level=info msg=\"started\" num=97 scope=pkg\n");
//! ```
//!
//! The top-level functions ([`info`], [`with_scope`], ...) use a process-wide
//! default state, replaceable with [`set_default`].
//! This crate depends on `adapters`, `config`, `ports` and `shared`.

pub mod filename;
pub mod global;
pub mod logger;
pub mod state;

pub use filename::{std_filename, std_filename_for};
pub use global::{
    debug, default_state, flush, info, set_default, with_context, with_error, with_field,
    with_fields, with_scope,
};
pub use logger::{CONTEXT_KEY, ERROR_KEY, Logger, SCOPE_KEY};
pub use state::State;

pub use petal_adapters::{
    FileWriter, FormatWriter, MemorySink, MemoryWriter, RecordedEvent, StderrLogSink,
    StdoutLogSink, TracingWriter,
};
pub use petal_ports::{
    CorrelationId, CorrelationSource, Fields, Flags, Level, LevelParseError, LogSink,
    RequestContext, SharedSink, Writer,
};

/// Returns the log crate version.
#[must_use]
pub const fn log_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
