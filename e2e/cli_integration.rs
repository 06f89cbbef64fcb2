// e2e/cli_integration.rs: CLI integration tests
//
// Tests the `lz4-cores` binary as a black-box CLI tool using
// std::process::Command. Covers the printed count, verbosity flags,
// --cpuinfo reporting and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Locate the `lz4-cores` binary produced by Cargo.
fn lz4_cores_bin() -> PathBuf {
    // CARGO_BIN_EXE_<name> is set by Cargo when building integration tests.
    // Fall back to walking up from the test binary location.
    if let Some(p) = option_env!("CARGO_BIN_EXE_lz4-cores") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push(format!("lz4-cores{}", std::env::consts::EXE_SUFFIX));
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(lz4_cores_bin())
        .args(args)
        .output()
        .expect("failed to run lz4-cores")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

// ── 1. Plain count ───────────────────────────────────────────────────────────

#[test]
fn test_cli_prints_positive_count() {
    let output = run(&[]);
    assert!(output.status.success(), "lz4-cores should exit 0");
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1, "expected a single line, got {lines:?}");
    let cores: usize = lines[0].trim().parse().expect("count should be an integer");
    assert!(cores >= 1);
}

#[test]
fn test_cli_matches_library() {
    let output = run(&[]);
    let cores: usize = stdout_lines(&output)[0].trim().parse().unwrap();
    assert_eq!(cores, lz4_cores::count_cores());
}

#[test]
fn test_cli_uncached_matches_cached() {
    let cached = stdout_lines(&run(&[]))[0].clone();
    let uncached = stdout_lines(&run(&["--uncached"]))[0].clone();
    assert_eq!(cached, uncached);
}

// ── 2. Verbosity ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_verbose_names_strategy() {
    let output = run(&["-v"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("strategy"), "stderr was: {stderr}");
    assert!(stderr.contains(lz4_cores::util::cores::HOST_STRATEGY));
}

#[test]
fn test_cli_quiet_keeps_stderr_empty() {
    let output = run(&["-qq"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_eq!(stdout_lines(&output).len(), 1);
}

// ── 3. --cpuinfo ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_cpuinfo_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cpuinfo");
    fs::write(&path, "processor\t: 0\nsiblings\t: 8\ncpu cores\t: 4\n").unwrap();

    let output = run(&["--cpuinfo", path.to_str().unwrap()]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4, "got {lines:?}");
    assert_eq!(lines[0], "siblings  : 8");
    assert_eq!(lines[1], "cpu cores : 4");
    assert_eq!(lines[2], "ratio     : 2");
}

#[test]
fn test_cli_cpuinfo_malformed_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cpuinfo");
    fs::write(&path, "siblings 8\n").unwrap();

    let output = run(&["--cpuinfo", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("can't parse cpuinfo file"), "stderr was: {stderr}");
}

#[test]
fn test_cli_cpuinfo_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent");
    let output = run(&["--cpuinfo", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

// ── 4. Usage errors ──────────────────────────────────────────────────────────

#[test]
fn test_cli_unknown_option_fails() {
    let output = run(&["--no-such-option"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("lz4-cores"));
}
