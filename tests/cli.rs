//! Tests that launch the built binary.

use std::process::Command;

fn echo_client() -> Command {
    Command::new(env!("CARGO_BIN_EXE_echo-client"))
}

#[test]
fn test_missing_argument_is_usage_error() {
    let output = echo_client().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unreadable_config_is_rejected() {
    let output = echo_client()
        .args(["--config", "/nonexistent/echo-client.toml", "hello"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read config file"));
}

/// Whatever is (or isn't) listening on the fixed port, the run ends with a
/// single report line.
#[test]
fn test_run_against_fixed_peer_terminates() {
    let output = echo_client()
        .args(["--connect-timeout", "2", "--read-timeout", "2", "hello"])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    match output.status.code() {
        Some(0) => assert!(stdout.starts_with("received: ")),
        Some(1) => assert!(stdout.contains("failed")),
        other => panic!("unexpected status {:?}, stdout: {}", other, stdout),
    }
}
