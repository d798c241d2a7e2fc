//! Logging configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Normalization trims string values before they are interpreted.

use petal_ports::{Flags, Level};
use petal_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Current config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LogConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Threshold level name (`debug`, `info`, `discard`).
    pub level: Box<str>,
    /// Render console output as JSON lines.
    pub json: bool,
    /// Prefix console output with a timestamp.
    pub timestamp: bool,
    /// Optional path of a structured log file attached as external writer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<Box<str>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            level: Level::Info.as_str().into(),
            json: false,
            timestamp: true,
            file: None,
        }
    }
}

impl LogConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedLogConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }

        let level = self
            .level
            .parse::<Level>()
            .map_err(|error| ConfigSchemaError::InvalidLevel {
                value: error.value().to_string(),
            })?;
        self.level = level.as_str().into();

        if let Some(file) = self.file.take() {
            let trimmed = file.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::EmptyFilePath);
            }
            self.file = Some(trimmed.into());
        }

        Ok(ValidatedLogConfig { raw: self, level })
    }

    /// Map the boolean format switches onto writer flags.
    #[must_use]
    pub const fn to_flags(&self) -> Flags {
        Flags::empty()
            .with(Flags::TIMESTAMP, self.timestamp)
            .with(Flags::JSON, self.json)
    }
}

/// Validated config wrapper carrying the parsed threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLogConfig {
    raw: LogConfig,
    level: Level,
}

impl ValidatedLogConfig {
    /// Parsed threshold level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Console writer flags.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.raw.to_flags()
    }

    /// Structured log file path, if configured.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.raw.file.as_deref().map(Path::new)
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LogConfig {
        self.raw
    }
}

impl AsRef<LogConfig> for ValidatedLogConfig {
    fn as_ref(&self) -> &LogConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLogConfig {
    type Target = LogConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Parse a log config from a JSON string, applying validation and normalization.
pub fn parse_log_config_json(input: &str) -> Result<ValidatedLogConfig, ErrorEnvelope> {
    let config: LogConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a log config from a TOML string, applying validation and normalization.
pub fn parse_log_config_toml(input: &str) -> Result<ValidatedLogConfig, ErrorEnvelope> {
    let config: LogConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// The level name is not recognized.
    InvalidLevel {
        /// Value provided.
        value: String,
    },
    /// The log file path is blank.
    EmptyFilePath,
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidLevel { .. } => ErrorCode::new("config", "invalid_level"),
            Self::EmptyFilePath => ErrorCode::new("config", "invalid_file"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::InvalidLevel { value } => write!(
                formatter,
                "level must be one of debug, info, discard (got {value:?})"
            ),
            Self::EmptyFilePath => formatter.write_str("file must be a non-empty path"),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::InvalidLevel { value } => envelope
                .with_metadata("field", "level")
                .with_metadata("value", value),
            ConfigSchemaError::EmptyFilePath => envelope.with_metadata("field", "file"),
        }
    }
}
