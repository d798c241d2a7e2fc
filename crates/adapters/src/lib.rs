//! # petal-adapters
//!
//! Writer and sink implementations for the petal ports: text/JSON rendering,
//! the structured file writer, the `tracing` bridge and in-memory doubles.
//! This crate depends on `ports` and `shared`.

pub mod file;
pub mod format;
pub mod log_sink;
pub mod memory;
pub mod tracing_bridge;

pub use file::FileWriter;
pub use format::{FormatWriter, render};
pub use log_sink::{FileSink, LOG_DIR_MODE, MemorySink, StderrLogSink, StdoutLogSink};
pub use memory::{MemoryWriter, RecordedEvent};
pub use tracing_bridge::{TRACING_TARGET, TracingWriter};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_ports::ports_crate_version;
    use petal_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;
        let mut in_dev_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                in_dev_deps = line == "[dev-dependencies]";
                continue;
            }
            if !(in_deps || in_dev_deps) {
                continue;
            }
            if line.starts_with("petal-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_do_not_depend_on_the_facade() {
        let deps = workspace_deps();
        let forbidden = ["petal-log", "petal-config"];

        for dep in &deps {
            assert!(
                !forbidden.contains(&dep.as_str()),
                "forbidden dependency found: {dep}"
            );
        }
    }

    #[test]
    fn adapters_can_use_ports_and_shared() {
        assert!(!adapters_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
