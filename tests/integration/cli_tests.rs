//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the keygen-cli crate so that
//! CARGO_BIN_EXE_keygen is available.

use std::io::Write;
use std::process::{Command, Output};

/// Get a Command pointing to the `keygen` binary.
fn keygen_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_keygen"))
}

fn run(args: &[&str]) -> Output {
    keygen_binary()
        .args(args)
        .output()
        .expect("failed to execute keygen")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn cli_responds_to_help() {
    let output = run(&["--help"]);
    assert!(
        output.status.success(),
        "keygen --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("keygen") || stdout.contains("Usage"),
        "keygen --help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("keygen"), "got: {stdout}");
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = run(&["--nonexistent-flag"]);
    assert!(!output.status.success());
}

#[test]
fn cli_generate_default_key() {
    let output = run(&["generate"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].chars().count(), 22);
    assert!(lines[0].chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn cli_generate_entropy_and_count() {
    let output = run(&["generate", "--charset", "12345678", "--entropy", "128", "-n", "3"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert_eq!(line.len(), 43);
        assert!(line.chars().all(|c| ('1'..='8').contains(&c)));
    }
}

#[test]
fn cli_length_overrides_entropy() {
    let output = run(&["generate", "--preset", "base62", "--entropy", "128", "--length", "3"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output)[0].len(), 3);
}

#[test]
fn cli_generate_json() {
    let output = run(&["generate", "--preset", "rfc6265", "-l", "16", "-n", "2", "--json"]);
    assert!(output.status.success());

    let keys: Vec<String> = serde_json::from_slice(&output.stdout).expect("valid JSON array");
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|k| k.chars().count() == 16));
}

#[test]
fn cli_rejects_invalid_charset() {
    let output = run(&["generate", "--charset", "abca"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate character"), "got: {stderr}");
    assert!(output.stdout.is_empty(), "no key may be printed on error");
}

#[test]
fn cli_rejects_zero_length() {
    let output = run(&["generate", "--length", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("key length must be at least 1"), "got: {stderr}");
}

#[test]
fn cli_rejects_huge_length() {
    let output = run(&["generate", "--length", "18446744073709551615"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the supported maximum"), "got: {stderr}");
    assert!(!stderr.contains("panicked"), "got: {stderr}");
}

#[test]
fn cli_rejects_unknown_preset() {
    let output = run(&["generate", "--preset", "base64"]);
    assert!(!output.status.success());
}

#[test]
fn cli_inspect_json() {
    let output = run(&["inspect", "--preset", "base62", "--entropy", "128", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["charset_size"], 62);
    assert_eq!(value["bits_per_draw"], 6);
    assert_eq!(value["key_length"], 22);
    assert!(value["entropy_bits"].as_f64().unwrap() > 128.0);
}

#[test]
fn cli_presets_lists_all() {
    let output = run(&["presets"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["base58", "base62", "rfc6265"] {
        assert!(stdout.contains(name), "missing {name} in: {stdout}");
    }
}

#[test]
fn cli_config_file_with_flag_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"charset": "abcdef", "key_length": 10}}"#).unwrap();
    let path = file.path().to_str().unwrap();

    let output = run(&["generate", "--config", path]);
    assert!(output.status.success());
    let key = &stdout_lines(&output)[0];
    assert_eq!(key.len(), 10);
    assert!(key.chars().all(|c| ('a'..='f').contains(&c)));

    // --entropy replaces the file's key_length: ceil(33 / 3) = 11.
    let output = run(&["generate", "--config", path, "--entropy", "33"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output)[0].len(), 11);
}

#[test]
fn cli_config_file_rejects_unknown_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"charst": "abc"}}"#).unwrap();

    let output = run(&["generate", "--config", file.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse config file"), "got: {stderr}");
}
