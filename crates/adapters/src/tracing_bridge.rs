//! External writer forwarding events into `tracing`.

use crate::log_sink::report_sink_failure;
use petal_ports::{Fields, Flags, Level, SharedSink, Writer};
use std::io;

/// Target attached to every forwarded event.
pub const TRACING_TARGET: &str = "petal";

/// Writer that re-emits events through the active `tracing` subscriber.
///
/// The subscriber owns formatting and destination, so flag and output
/// changes are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWriter;

impl TracingWriter {
    /// Create the bridge.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Writer for TracingWriter {
    fn set_flags(&self, _flags: Flags) {}

    fn set_output(&self, _output: Option<SharedSink>) {}

    fn log(&self, level: Level, fields: &Fields, message: &str) {
        let fields = encoded_or_reported(serde_json::to_string(fields));
        match level {
            Level::Debug => tracing::debug!(target: TRACING_TARGET, fields = %fields, "{message}"),
            Level::Info => tracing::info!(target: TRACING_TARGET, fields = %fields, "{message}"),
            Level::Discard => {},
        }
    }

    fn flush(&self) {}
}

/// Falls back to an empty object after reporting the encoding failure.
fn encoded_or_reported(encoded: serde_json::Result<String>) -> String {
    encoded.unwrap_or_else(|error| {
        report_sink_failure("tracing bridge could not encode fields", &io::Error::from(error));
        String::from("{}")
    })
}
