//! Writer boundary contract.

use crate::flags::Flags;
use crate::level::Level;
use crate::log_sink::SharedSink;
use std::collections::BTreeMap;

/// Structured key/value context attached to an event.
///
/// Ordered by key so that rendering is deterministic.
pub type Fields = BTreeMap<String, serde_json::Value>;

/// Boundary contract for services that format and emit log events.
///
/// Every method takes `&self`; implementations guard their own flags and
/// destination so that concurrent `log` calls never interleave within a line.
pub trait Writer: Send + Sync {
    /// Configure the writer for log format options.
    ///
    /// Affects subsequent `log` calls only.
    fn set_flags(&self, flags: Flags);

    /// Redirect rendered lines to `output`; `None` discards them.
    ///
    /// Writers whose destination is fixed at construction ignore this.
    fn set_output(&self, output: Option<SharedSink>);

    /// Render and emit one event.
    ///
    /// Never fails from the caller's perspective; write errors are swallowed.
    fn log(&self, level: Level, fields: &Fields, message: &str);

    /// Make any buffered output durable.
    fn flush(&self);
}
