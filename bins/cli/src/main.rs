//! CLI binary entrypoint.

mod error;
mod format;

use clap::{Parser, Subcommand};
use error::{CliError, ExitCode};
use format::{FormatArgs, OutputTarget};
use petal_config::{
    LogConfig, ValidatedLogConfig, load_log_config_std_env, to_pretty_json, to_pretty_toml,
};
use petal_log::{
    CorrelationId, Fields, RequestContext, SharedSink, State, StdoutLogSink, TracingWriter, Writer,
    std_filename,
};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "petal",
    version,
    about = "Structured, leveled logging from the command line",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    format: FormatArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log one message through the configured writers.
    Emit {
        /// Scope attached to the message.
        #[arg(long)]
        scope: Option<String>,
        /// Field as `key=value`; JSON scalars keep their type. Repeatable.
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Correlation id recorded as the `ctx` field.
        #[arg(long)]
        correlation_id: Option<String>,
        /// Log at debug level instead of info.
        #[arg(long)]
        debug: bool,
        /// Message text.
        message: String,
    },
    /// Print the effective config (defaults, file, env and flags).
    Config {
        /// Print TOML instead of JSON.
        #[arg(long)]
        toml: bool,
    },
    /// Print the default log filename for this process.
    Filename,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => std::process::ExitCode::from(ExitCode::Ok.as_u8()),
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = effective_config(&cli.format)?;

    match &cli.command {
        Commands::Config { toml: false } => write_stdout(&to_pretty_json(&config)?),
        Commands::Config { toml: true } => write_stdout(&to_pretty_toml(&config)?),
        Commands::Filename => write_stdout(&format!("{}\n", std_filename())),
        Commands::Emit {
            scope,
            fields,
            correlation_id,
            debug,
            message,
        } => {
            let state = build_state(&cli.format, &config)?;
            let mut logger = state.logger();
            if let Some(scope) = scope {
                logger = logger.with_scope(scope);
            }
            if let Some(correlation_id) = correlation_id {
                let context =
                    RequestContext::with_correlation_id(CorrelationId::parse(correlation_id)?);
                logger = logger.with_context(Some(&context));
            }
            logger = logger.with_fields(parse_fields(fields)?);

            if *debug {
                logger.debug(message);
            } else {
                logger.info(message);
            }
            state.flush();
            Ok(())
        },
    }
}

/// Layer the CLI flags over env, config file and defaults.
fn effective_config(args: &FormatArgs) -> Result<ValidatedLogConfig, CliError> {
    let loaded = load_log_config_std_env(args.config.as_deref())?;
    apply_flag_overrides(loaded.into_inner(), args)
}

fn apply_flag_overrides(
    mut config: LogConfig,
    args: &FormatArgs,
) -> Result<ValidatedLogConfig, CliError> {
    if let Some(level) = args.level {
        config.level = level.as_str().into();
    }
    if args.json {
        config.json = true;
    }
    if args.no_timestamp {
        config.timestamp = false;
    }
    if let Some(path) = args.log_file.as_ref() {
        config.file = Some(path.to_string_lossy().into());
    }

    config
        .validate_and_normalize()
        .map_err(|error| CliError::Envelope(error.into()))
}

fn build_state(args: &FormatArgs, config: &ValidatedLogConfig) -> Result<State, CliError> {
    // Both claim the single external writer; checked before the file is truncated.
    if args.tracing {
        if let Some(path) = config.file() {
            return Err(CliError::InvalidInput(format!(
                "--tracing cannot be combined with a log file ({})",
                path.display()
            )));
        }
    }
    let state = State::from_config(config)?;
    match args.output {
        OutputTarget::Stderr => {},
        OutputTarget::Stdout => {
            let stdout: SharedSink = Arc::new(StdoutLogSink);
            state.with_output(Some(stdout));
        },
        OutputTarget::None => {
            state.with_output(None);
        },
    }

    if args.tracing {
        init_tracing()?;
        let bridge: Arc<dyn Writer> = Arc::new(TracingWriter::new());
        state.with_external(Some(bridge));
    }
    Ok(state)
}

fn init_tracing() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("petal=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|error| CliError::Internal(format!("failed to initialise tracing: {error}")))
}

fn parse_fields(raw: &[String]) -> Result<Fields, CliError> {
    raw.iter().map(String::as_str).map(parse_field).collect()
}

fn parse_field(pair: &str) -> Result<(String, Value), CliError> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(CliError::InvalidInput(format!(
            "field must be KEY=VALUE (got {pair:?})"
        )));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "field key must be non-empty (got {pair:?})"
        )));
    }

    let value = match serde_json::from_str::<Value>(value) {
        Ok(parsed @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => parsed,
        _ => Value::String(value.to_string()),
    };
    Ok((key.to_string(), value))
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
