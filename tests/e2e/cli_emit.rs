//! `petal emit` E2E tests.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn run_cli(args: &[&str], envs: &[(&str, &str)]) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_petal"));
    command.args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("PETAL_") || key == "RUST_LOG" {
            command.env_remove(key);
        }
    }
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output()
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("{prefix}-{}-{nanos}", std::process::id()))
}

#[test]
fn emit_writes_text_line_to_stdout() -> io::Result<()> {
    let output = run_cli(
        &[
            "--output",
            "stdout",
            "--no-timestamp",
            "emit",
            "--scope",
            "pkg",
            "--field",
            "num=97",
            "--field",
            "str=more years Morty!",
            "--correlation-id",
            "testID",
            "captain's log",
        ],
        &[],
    )?;

    assert!(output.status.success());
    assert_eq!(
        stdout_text(&output),
        "level=info msg=\"captain's log\" ctx=testID num=97 scope=pkg str=\"more years Morty!\"\n"
    );
    Ok(())
}

#[test]
fn default_output_is_stderr_with_timestamp() -> io::Result<()> {
    let output = run_cli(&["emit", "hello"], &[])?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("time="), "unexpected stderr: {stderr}");
    assert!(stderr.ends_with("level=info msg=\"hello\"\n"));
    Ok(())
}

#[test]
fn debug_is_filtered_at_info_threshold() -> io::Result<()> {
    let quiet = run_cli(&["--output", "stdout", "emit", "--debug", "x"], &[])?;
    assert!(quiet.status.success());
    assert!(quiet.stdout.is_empty());

    let loud = run_cli(
        &["--output", "stdout", "--level", "debug", "--no-timestamp", "emit", "--debug", "x"],
        &[],
    )?;
    assert_eq!(stdout_text(&loud), "level=debug msg=\"x\"\n");
    Ok(())
}

#[test]
fn json_output_parses_back() -> io::Result<()> {
    let output = run_cli(
        &["--output", "stdout", "--json", "emit", "--field", "num=3", "m"],
        &[],
    )?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value.get("level").and_then(|v| v.as_str()), Some("info"));
    assert_eq!(value.get("msg").and_then(|v| v.as_str()), Some("m"));
    assert_eq!(value.get("num").and_then(serde_json::Value::as_i64), Some(3));
    assert!(value.get("time").is_some());
    Ok(())
}

#[test]
fn log_file_receives_structured_copy() -> io::Result<()> {
    let dir = temp_dir("petal-cli-log-file");
    let path = dir.join("nested").join("app.log");
    let path_arg = path.to_string_lossy().to_string();

    let output = run_cli(
        &[
            "--output",
            "none",
            "--log-file",
            &path_arg,
            "emit",
            "--scope",
            "pkg",
            "stored",
        ],
        &[],
    )?;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());

    let contents = std::fs::read_to_string(&path)?;
    let value: serde_json::Value =
        serde_json::from_str(contents.trim_end()).map_err(io::Error::other)?;
    assert_eq!(value.get("msg").and_then(|v| v.as_str()), Some("stored"));
    assert_eq!(value.get("scope").and_then(|v| v.as_str()), Some("pkg"));
    assert!(value.get("time").is_some());

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn malformed_field_exits_with_invalid_input() -> io::Result<()> {
    let output = run_cli(&["emit", "--field", "oops", "m"], &[])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("KEY=VALUE"));
    Ok(())
}

#[test]
fn unwritable_log_file_exits_with_io_code() -> io::Result<()> {
    let dir = temp_dir("petal-cli-log-blocked");
    std::fs::create_dir_all(&dir)?;
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, "not a directory")?;
    let path_arg = blocker.join("app.log").to_string_lossy().to_string();

    let output = run_cli(&["--log-file", &path_arg, "emit", "m"], &[])?;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
