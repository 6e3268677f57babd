use std::process::{Command, Output};

use sysdiag::presenter::{help_text, TITLE};

const MISSING_DOCKER: &str = "/nonexistent/bin/docker-for-sysdiag-tests";

/// Helper to run the built binary with a docker CLI that cannot be spawned.
fn sysdiag(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sysdiag"))
        .args(args)
        .env("SYSDIAG_DOCKER", MISSING_DOCKER)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn text(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

#[test]
fn test_help_exits_zero() {
    for flag in ["-h", "-help"] {
        let output = sysdiag(&[flag, "-vm"]);

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(text(&output.stdout), help_text());
        assert!(output.stderr.is_empty());
    }
}

#[test]
fn test_unknown_selectors_exit_zero_with_header() {
    let output = sysdiag(&["-zz", "nope"]);
    let stdout = text(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout.lines().count(), 3);
    assert_eq!(stdout.lines().nth(1), Some(TITLE));
}

#[test]
fn test_collector_failure_is_fatal() {
    let output = sysdiag(&["-c", "-vm"]);
    let stdout = text(&output.stdout);
    let stderr = text(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains(TITLE));
    // nothing after the failing collector runs
    assert!(!stdout.contains("VIRTUAL MEMORY:"));

    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr was: {stderr}");
    assert!(lines[0].starts_with("Error: cannot access docker container list"));
    assert!(lines[0].contains(MISSING_DOCKER));
}

#[test]
fn test_keep_going_reports_each_failure() {
    let output = sysdiag(&["--keep-going", "-c", "-c"]);
    let stderr = text(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 2, "stderr was: {stderr}");
    assert!(lines.iter().all(|line| line.starts_with("Error: -c: cannot access")));
}

#[test]
fn test_keep_going_runs_later_collectors() {
    let output = sysdiag(&["--keep-going", "-c", "-vm"]);
    let stdout = text(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    // memory can be hidden in odd sandboxes; then it fails too
    let failures = text(&output.stderr).lines().count();
    assert!(stdout.contains("VIRTUAL MEMORY:") || failures == 2);
}

#[test]
fn test_invalid_log_filter_is_a_usage_error() {
    let output = sysdiag(&["--log-filter", "sysdiag=loud", "-vm"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
