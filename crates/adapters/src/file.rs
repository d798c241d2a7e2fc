//! File-backed writer with a fixed structured format.

use crate::format::FormatWriter;
use crate::log_sink::{FileSink, report_sink_failure};
use petal_ports::{Fields, Flags, Level, SharedSink, Writer};
use petal_shared::Result;
use std::path::Path;
use std::sync::Arc;

/// Writer persisting every event to a file as timestamped JSON lines.
///
/// Flag and output changes are ignored: the file always receives the
/// structured form, whatever the console writer is configured to print.
#[derive(Debug)]
pub struct FileWriter {
    sink: Arc<FileSink>,
    writer: FormatWriter,
}

impl FileWriter {
    /// Flags every file writer renders with.
    pub const FLAGS: Flags = Flags::TIMESTAMP.with(Flags::JSON, true);

    /// Create (or truncate) the file at `path`, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let sink = Arc::new(FileSink::create(path.as_ref())?);
        let output: SharedSink = sink.clone();
        Ok(Self {
            writer: FormatWriter::new(Some(output), Self::FLAGS),
            sink,
        })
    }
}

impl Writer for FileWriter {
    fn set_flags(&self, _flags: Flags) {}

    fn set_output(&self, _output: Option<SharedSink>) {}

    fn log(&self, level: Level, fields: &Fields, message: &str) {
        self.writer.log(level, fields, message);
    }

    fn flush(&self) {
        self.writer.flush();
        if let Err(error) = self.sink.sync() {
            report_sink_failure("log file sync failed", &error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::MemorySink;
    use serde_json::{Value, json};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir()
            .join(format!("petal-file-writer-{}-{nanos}", std::process::id()))
            .join(name)
    }

    #[test]
    fn file_writer_ignores_flag_and_output_changes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let path = temp_path("events.log");
        let writer = FileWriter::create(&path)?;

        writer.set_flags(Flags::empty());
        writer.set_output(Some(Arc::new(MemorySink::new())));
        let fields: Fields = [("scope".to_string(), json!("pkg"))].into_iter().collect();
        writer.log(Level::Info, &fields, "first");
        writer.log(Level::Debug, &Fields::new(), "second");
        writer.flush();

        let contents = std::fs::read_to_string(&path)?;
        let lines: Vec<Value> = contents
            .lines()
            .map(serde_json::from_str)
            .collect::<std::result::Result<_, _>>()?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], json!("info"));
        assert_eq!(lines[0]["msg"], json!("first"));
        assert_eq!(lines[0]["scope"], json!("pkg"));
        assert_eq!(lines[1]["level"], json!("debug"));
        assert!(lines.iter().all(|line| line.get("time").is_some()));

        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    #[test]
    fn file_flags_are_structured_and_timestamped() {
        assert!(FileWriter::FLAGS.contains(Flags::JSON));
        assert!(FileWriter::FLAGS.contains(Flags::TIMESTAMP));
    }
}
