//! End-to-end runs of the `fastq-validate` binary
#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn bin_path() -> String {
    std::env::var("CARGO_BIN_EXE_fastq-validate")
        .unwrap_or_else(|_| "target/debug/fastq-validate".to_string())
}

fn write_script(dir: &TempDir, body: &str) -> PathBuf {
    let script = dir.path().join("fake_fastq_info.sh");
    std::fs::write(&script, body).expect("write script");
    script
}

fn run_cli(script: &Path, fastq: &str, extra: &[&str]) -> Output {
    Command::new(bin_path())
        .arg("--validator")
        .arg("sh")
        .arg("--validator-arg")
        .arg(script)
        .args(extra)
        .arg(fastq)
        .env_remove("RUST_LOG")
        .env_remove("FASTQ_VALIDATOR_PROGRAM")
        .output()
        .expect("Failed to run fastq-validate")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON report")
}

#[test]
fn valid_file_prints_valid_report() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "echo 'all good' >&2\n");

    let output = run_cli(&script, "reads.fastq", &[]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        r#"{"validation_state":"VALID","validation_errors":[]}"#
    );
}

#[test]
fn invalid_file_still_exits_zero() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "echo 'ERROR: record 1 malformed' >&2\necho 'ERROR: record 2 malformed' >&2\nexit 1\n",
    );

    let output = run_cli(&script, "reads.fastq", &[]);

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["validation_state"], "INVALID");
    let errors = report["validation_errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["user_friendly_message"], "ERROR: record 1 malformed");
    assert_eq!(errors[1]["user_friendly_message"], "ERROR: record 2 malformed");
}

#[test]
fn pretty_output_parses_to_same_report() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "echo 'ERROR: bad' >&2\n");

    let output = run_cli(&script, "reads.fastq", &["--pretty"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains('\n'));
    assert_eq!(stdout_json(&output)["validation_state"], "INVALID");
}

#[test]
fn debug_log_names_config_file() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "echo 'all good' >&2\n");
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[validator]\ntimeout_secs = 60\n").expect("write config");

    let output = run_cli(
        &script,
        "reads.fastq",
        &["--log-level", "debug", "--config", config.to_str().unwrap()],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Using config file"), "stderr: {}", stderr);
    assert_eq!(stdout_json(&output)["validation_state"], "VALID");
}

#[test]
fn missing_validator_fails_without_report() {
    let output = Command::new(bin_path())
        .args(["--validator", "/nonexistent/fastq_info", "reads.fastq"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run fastq-validate");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/fastq_info"), "stderr: {}", stderr);
}

#[test]
fn missing_file_argument_is_usage_error() {
    let output = Command::new(bin_path())
        .output()
        .expect("Failed to run fastq-validate");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
