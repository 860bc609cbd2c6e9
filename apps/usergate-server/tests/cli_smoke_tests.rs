#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the usergate-server binary

use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Helper to run the usergate-server binary with given arguments
fn run_usergate_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_usergate-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute usergate-server")
}

#[test]
fn test_cli_help_command() {
    let output = run_usergate_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--print-config"));
}

#[test]
fn test_cli_version_command() {
    let output = run_usergate_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usergate-server"), "Should contain binary name");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_usergate_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report the invalid command: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_usergate_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(
        !output.status.success(),
        "Should fail when config file doesn't exist"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_usergate_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("usergate.yaml");
    let config_content = r"
users:
  listen_addr: 127.0.0.1:6051
gateway:
  listen_addr: 127.0.0.1:6052
  users_endpoint: http://127.0.0.1:6051
  rpc_timeout_ms: 2000
logging:
  level: debug
";
    std::fs::write(&config_path, config_content).expect("Failed to write config file");

    let output = run_usergate_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(
        output.status.success(),
        "Check should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("127.0.0.1:6052"));
}

#[test]
fn test_cli_check_rejects_bad_listen_addr() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad.yaml");
    std::fs::write(&config_path, "users:\n  listen_addr: nowhere\n")
        .expect("Failed to write config file");

    let output = run_usergate_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("users.listen_addr"), "got: {stderr}");
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let output = run_usergate_server(&[
        "--users-endpoint",
        "http://users.internal:9000",
        "--gateway-listen",
        "127.0.0.1:9001",
        "--print-config",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration:"));
    assert!(stdout.contains("http://users.internal:9000"));
    assert!(stdout.contains("127.0.0.1:9001"));
    assert!(stdout.contains("0.0.0.0:50051"));
}

#[test]
fn test_cli_verbose_flag() {
    let output = run_usergate_server(&["-vvv", "check"]);
    assert!(output.status.success(), "Verbose check should succeed");
}
