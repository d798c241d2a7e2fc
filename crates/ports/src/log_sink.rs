//! Destination contract for rendered log lines.

use std::sync::Arc;

/// A sink that receives pre-formatted log lines.
///
/// Implementations serialize concurrent writers and swallow I/O failures:
/// a line may be dropped, but the caller is never interrupted.
pub trait LogSink: Send + Sync {
    /// Write a line (including its trailing newline) to the sink.
    fn write_line(&self, line: &str);

    /// Push buffered bytes to the underlying destination.
    fn flush(&self) {}
}

/// Shared handle to a sink, as held by writers and state.
pub type SharedSink = Arc<dyn LogSink>;
