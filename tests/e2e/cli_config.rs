//! Config layering E2E tests: defaults, file, env and flags.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn run_cli(args: &[&str], envs: &[(&str, &str)]) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_petal"));
    command.args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("PETAL_") {
            command.env_remove(key);
        }
    }
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output()
}

fn effective_config(args: &[&str], envs: &[(&str, &str)]) -> io::Result<serde_json::Value> {
    let mut full: Vec<&str> = args.to_vec();
    full.push("config");
    let output = run_cli(&full, envs)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::other(format!("config failed: {stderr}")));
    }
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

fn write_config(name: &str, contents: &str) -> io::Result<PathBuf> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or_default();
    let dir = std::env::temp_dir().join(format!("petal-cli-config-{}-{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn defaults_are_reported() -> io::Result<()> {
    let config = effective_config(&[], &[])?;
    assert_eq!(
        config,
        serde_json::json!({
            "version": 1,
            "level": "info",
            "json": false,
            "timestamp": true,
        })
    );
    Ok(())
}

#[test]
fn flags_beat_env_and_env_beats_file() -> io::Result<()> {
    let path = write_config("log.toml", "level = \"discard\"\njson = true\n")?;
    let path_arg = path.to_string_lossy().to_string();

    let from_file = effective_config(&["--config", &path_arg], &[])?;
    assert_eq!(from_file.get("level").and_then(|v| v.as_str()), Some("discard"));
    assert_eq!(from_file.get("json").and_then(serde_json::Value::as_bool), Some(true));

    let from_env = effective_config(&["--config", &path_arg], &[("PETAL_LOG_LEVEL", "info")])?;
    assert_eq!(from_env.get("level").and_then(|v| v.as_str()), Some("info"));

    let from_flag = effective_config(
        &["--config", &path_arg, "--level", "debug"],
        &[("PETAL_LOG_LEVEL", "info")],
    )?;
    assert_eq!(from_flag.get("level").and_then(|v| v.as_str()), Some("debug"));

    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir)?;
    }
    Ok(())
}

#[test]
fn config_errors_exit_with_code_two() -> io::Result<()> {
    let bad_env = run_cli(&["config"], &[("PETAL_LOG_JSON", "sometimes")])?;
    assert_eq!(bad_env.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&bad_env.stderr).contains("PETAL_LOG_JSON"));

    let path = write_config("log.json", r#"{"level":"verbose"}"#)?;
    let path_arg = path.to_string_lossy().to_string();
    let bad_file = run_cli(&["--config", &path_arg, "config"], &[])?;
    assert_eq!(bad_file.status.code(), Some(2));

    let missing = run_cli(&["--config", "/nonexistent/petal/log.json", "config"], &[])?;
    assert_eq!(missing.status.code(), Some(2));

    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir)?;
    }
    Ok(())
}

#[test]
fn filename_has_program_stem_and_timestamp() -> io::Result<()> {
    let output = run_cli(&["filename"], &[])?;
    assert!(output.status.success());
    let name = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    assert!(name.starts_with("petal_"), "unexpected filename: {name}");
    assert!(name.ends_with("s.log"));
    Ok(())
}

#[test]
fn config_can_be_printed_as_toml() -> io::Result<()> {
    let output = run_cli(&["--json", "config", "--toml"], &[("PETAL_LOG_LEVEL", "debug")])?;
    assert!(output.status.success());

    let text = String::from_utf8_lossy(&output.stdout);
    let config: toml::Value = toml::from_str(&text).map_err(io::Error::other)?;
    assert_eq!(config.get("level").and_then(toml::Value::as_str), Some("debug"));
    assert_eq!(config.get("json").and_then(toml::Value::as_bool), Some(true));
    assert_eq!(config.get("timestamp").and_then(toml::Value::as_bool), Some(true));
    Ok(())
}
