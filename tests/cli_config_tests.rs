//! End-to-end tests for `aacboard config` commands.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the aacboard binary (set by cargo at compile time)
fn aacboard_bin() -> &'static str {
    env!("CARGO_BIN_EXE_aacboard")
}

/// Runs the binary with an isolated config directory.
fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(aacboard_bin())
        .env("AACBOARD_CONFIG_DIR", config_dir)
        .args(args)
        .args(["--log-file", config_dir.join("test.log").to_str().unwrap()])
        .output()
        .expect("Failed to execute command")
}

fn show_json(config_dir: &Path) -> serde_json::Value {
    let output = run(&["config", "show", "--json"], config_dir);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "show"], temp_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hover (dwell)"), "stdout: {stdout}");
    assert!(stdout.contains("1000 ms"), "stdout: {stdout}");
}

#[test]
fn test_config_show_json_format() {
    let temp_dir = TempDir::new().unwrap();
    let json = show_json(temp_dir.path());

    assert_eq!(json["activation"]["mode"], "dwell");
    assert_eq!(json["activation"]["dwell_ms"], 1000);
    assert_eq!(json["ui"]["theme"], "auto");
    assert!(json["path"]
        .as_str()
        .unwrap()
        .starts_with(temp_dir.path().to_str().unwrap()));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists_values() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &[
            "config", "set", "--mode", "click", "--dwell-ms", "1500", "--voice", "en-gb", "--rate",
            "160",
        ],
        temp_dir.path(),
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp_dir.path().join("config.toml").exists());

    let json = show_json(temp_dir.path());
    assert_eq!(json["activation"]["mode"], "immediate");
    assert_eq!(json["activation"]["dwell_ms"], 1500);
    assert_eq!(json["speech"]["voice"], "en-gb");
    assert_eq!(json["speech"]["rate"], 160);
}

#[test]
fn test_config_set_without_options_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "set"], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one configuration option"));
}

#[test]
fn test_config_set_rejects_zero_dwell() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "set", "--dwell-ms", "0"], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_unknown_mode() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "set", "--mode", "blink"], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown activation mode"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("config.toml"),
        "[activation]\nmode = \"dwell\"\ndwell_ms = 0\n",
    )
    .unwrap();

    let output = run(&["config", "show"], temp_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn test_say_requires_text() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["say"], temp_dir.path());

    // clap usage error
    assert_eq!(output.status.code(), Some(2));
}
