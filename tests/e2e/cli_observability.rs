//! `--tracing` bridge E2E tests.

use std::io;
use std::process::Command;

#[test]
fn tracing_bridge_mirrors_events_to_the_subscriber() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_petal"))
        .args([
            "--output",
            "stdout",
            "--no-timestamp",
            "--tracing",
            "emit",
            "--field",
            "num=97",
            "bridged",
        ])
        .env_remove("RUST_LOG")
        .env_remove("PETAL_LOG_FILE")
        .env_remove("PETAL_LOG_LEVEL")
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "level=info msg=\"bridged\" num=97\n"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INFO"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("petal"));
    assert!(stderr.contains("bridged"));
    assert!(stderr.contains(r#"fields={"num":97}"#));
    Ok(())
}

#[test]
fn tracing_conflicts_with_log_file() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_petal"))
        .args(["--tracing", "--log-file", "x.log", "emit", "m"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn tracing_conflicts_with_log_file_from_env() -> io::Result<()> {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or_default();
    let dir = std::env::temp_dir().join(format!(
        "petal-cli-tracing-env-{}-{nanos}",
        std::process::id()
    ));
    let path = dir.join("app.log");

    let output = Command::new(env!("CARGO_BIN_EXE_petal"))
        .args(["--tracing", "emit", "hello"])
        .env_remove("RUST_LOG")
        .env_remove("PETAL_LOG_LEVEL")
        .env("PETAL_LOG_FILE", &path)
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--tracing"));
    assert!(!path.exists());
    Ok(())
}
