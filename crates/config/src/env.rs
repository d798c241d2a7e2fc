//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present but blank or malformed
//! fails fast instead of being ignored.

use crate::schema::{ConfigSchemaError, LogConfig, ValidatedLogConfig};
use petal_ports::Level;
use petal_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: threshold level.
pub const ENV_LOG_LEVEL: &str = "PETAL_LOG_LEVEL";
/// Env var: JSON console output (true/false).
pub const ENV_LOG_JSON: &str = "PETAL_LOG_JSON";
/// Env var: timestamped console output (true/false).
pub const ENV_LOG_TIMESTAMP: &str = "PETAL_LOG_TIMESTAMP";
/// Env var: structured log file path.
pub const ENV_LOG_FILE: &str = "PETAL_LOG_FILE";

const ALL_VARS: [&str; 4] = [ENV_LOG_LEVEL, ENV_LOG_JSON, ENV_LOG_TIMESTAMP, ENV_LOG_FILE];

/// Parsed env overrides; `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEnv {
    /// Threshold override.
    pub level: Option<Level>,
    /// JSON switch override.
    pub json: Option<bool>,
    /// Timestamp switch override.
    pub timestamp: Option<bool>,
    /// Log file override.
    pub file: Option<Box<str>>,
}

impl LogEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            level: parse_optional_level(map, ENV_LOG_LEVEL)?,
            json: parse_optional_bool(map, ENV_LOG_JSON)?,
            timestamp: parse_optional_bool(map, ENV_LOG_TIMESTAMP)?,
            file: parse_optional_trimmed_string(map, ENV_LOG_FILE)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_VARS {
            if let Some(value) = std::env::var_os(name) {
                map.insert(name.to_string(), value.to_string_lossy().into_owned());
            }
        }
        Self::from_map(&map)
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: LogConfig,
    env: &LogEnv,
) -> Result<ValidatedLogConfig, ConfigSchemaError> {
    let mut config = base;
    if let Some(level) = env.level {
        config.level = level.as_str().into();
    }
    if let Some(json) = env.json {
        config.json = json;
    }
    if let Some(timestamp) = env.timestamp {
        config.timestamp = timestamp;
    }
    if let Some(file) = env.file.as_ref() {
        config.file = Some(file.clone());
    }

    config.validate_and_normalize()
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Level env var had an invalid value.
    InvalidLevel {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidLevel { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidLevel { var, .. } => {
                write!(formatter, "{var} must be one of debug, info, discard")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value }
            | EnvParseError::InvalidLevel { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn non_empty<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    Ok(non_empty(map, var)?.map(Into::into))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(trimmed) = non_empty(map, var)? else {
        return Ok(None);
    };

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: trimmed.to_string(),
        }),
    }
}

fn parse_optional_level(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Level>, EnvParseError> {
    let Some(trimmed) = non_empty(map, var)? else {
        return Ok(None);
    };

    trimmed
        .parse::<Level>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidLevel {
            var,
            value: trimmed.to_string(),
        })
}
