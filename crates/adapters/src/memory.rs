//! Recording writer used as a test double.

use petal_ports::{Fields, Flags, Level, SharedSink, Writer};
use std::sync::{Mutex, PoisonError};

/// One event as received by a [`MemoryWriter`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// Level the event was dispatched at.
    pub level: Level,
    /// Field snapshot passed alongside the event.
    pub fields: Fields,
    /// Event message.
    pub message: String,
}

/// Writer that keeps every call it receives in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    inner: Mutex<Recorded>,
}

#[derive(Debug, Default)]
struct Recorded {
    events: Vec<RecordedEvent>,
    flags: Vec<Flags>,
    output_updates: usize,
    flushes: usize,
}

impl MemoryWriter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, in dispatch order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.lock().events.clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.lock().events)
    }

    /// Messages of the recorded events.
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .events
            .iter()
            .map(|event| event.message.clone())
            .collect()
    }

    /// Every value passed to `set_flags`, oldest first.
    pub fn flag_updates(&self) -> Vec<Flags> {
        self.lock().flags.clone()
    }

    /// Number of `set_output` calls.
    pub fn output_updates(&self) -> usize {
        self.lock().output_updates
    }

    /// Number of `flush` calls.
    pub fn flush_count(&self) -> usize {
        self.lock().flushes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Writer for MemoryWriter {
    fn set_flags(&self, flags: Flags) {
        self.lock().flags.push(flags);
    }

    fn set_output(&self, _output: Option<SharedSink>) {
        self.lock().output_updates += 1;
    }

    fn log(&self, level: Level, fields: &Fields, message: &str) {
        self.lock().events.push(RecordedEvent {
            level,
            fields: fields.clone(),
            message: message.to_string(),
        });
    }

    fn flush(&self) {
        self.lock().flushes += 1;
    }
}
