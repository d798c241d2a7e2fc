//! # petal-config
//!
//! Logging configuration schema, validation, env overrides and file loading.
//! This crate depends on `ports` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_LOG_FILE, ENV_LOG_JSON, ENV_LOG_LEVEL, ENV_LOG_TIMESTAMP, EnvParseError, LogEnv,
    apply_env_overrides,
};
pub use load::{load_log_config_from_path, load_log_config_std_env, to_pretty_json, to_pretty_toml};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LogConfig, ValidatedLogConfig,
    parse_log_config_json, parse_log_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_ports::ports_crate_version;
    use petal_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_can_use_ports_and_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
