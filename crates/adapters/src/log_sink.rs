//! Log sinks: where rendered lines end up.

use petal_ports::LogSink;
use petal_shared::{ErrorEnvelope, Result};
use std::fs::{DirBuilder, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Permissions of directories created for log files (owner rwx, group/other rx).
pub const LOG_DIR_MODE: u32 = 0o755;

/// Log sink that writes to stderr.
#[derive(Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        // Nowhere left to report a stderr failure; the line is dropped.
        let _ = io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = io::stderr().lock().flush();
    }
}

/// Log sink that writes to stdout.
#[derive(Debug, Default)]
pub struct StdoutLogSink;

impl LogSink for StdoutLogSink {
    fn write_line(&self, line: &str) {
        if let Err(error) = io::stdout().lock().write_all(line.as_bytes()) {
            report_sink_failure("stdout log sink write failed", &error);
        }
    }

    fn flush(&self) {
        if let Err(error) = io::stdout().lock().flush() {
            report_sink_failure("stdout log sink flush failed", &error);
        }
    }
}

/// In-memory sink capturing every line, for tests and examples.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }

    /// Captured output as one string, exactly as written.
    pub fn contents(&self) -> String {
        self.lines().concat()
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        guard.push(line.to_string());
    }
}

/// Sink backed by a regular file, created (truncated) on open.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Create the parent directories and the file itself.
    ///
    /// An existing file is truncated.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_log_dir(parent).map_err(|error| ErrorEnvelope::io_at(&error, parent))?;
            }
        }

        let file = File::create(path).map_err(|error| ErrorEnvelope::io_at(&error, path))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Force written data and metadata to stable storage.
    pub fn sync(&self) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush()?;
        file.sync_all()
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = file.write_all(line.as_bytes()) {
            report_sink_failure("log file write failed", &error);
        }
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = file.flush() {
            report_sink_failure("log file flush failed", &error);
        }
    }
}

fn create_log_dir(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(LOG_DIR_MODE);
    }
    builder.create(dir)
}

/// Best-effort diagnostic for a failed sink operation; never panics.
pub(crate) fn report_sink_failure(context: &str, error: &io::Error) {
    let _ = writeln!(io::stderr().lock(), "{context}: {error}");
}
