//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with its data directory pointed at a
//! temporary folder and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command with optional stdin and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sleepdiary-cli"))
        .args(args)
        .env("SLEEPDIARY_DATA_DIR", data_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    // The CLI may exit before reading everything (e.g. on a bad argument).
    if let Some(mut pipe) = child.stdin.take() {
        let _ = pipe.write_all(stdin.as_bytes());
    }

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

const NIGHT: &str = "23:00\n07:00\n07:10\n0\n4\n420\n20\n10\n1\nslept well\n";

#[test]
fn test_compute_overnight() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &[
            "entry", "compute", "--bedtime", "23:00", "--wake-target", "07:00",
            "--total", "420", "--awake", "20", "--latency", "10",
        ],
        "",
    );
    assert_eq!(code, 0, "compute failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["target_window_minutes"], 480);
    assert_eq!(json["efficiency_actual_pct"], 93.33);
    assert_eq!(json["efficiency_vs_target_pct"], 87.5);
    assert_eq!(json["rounding"], "two-sig-figs");
}

#[test]
fn test_compute_with_integer_rounding() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &[
            "entry", "compute", "--bedtime", "01:00", "--wake-target", "01:30",
            "--total", "60", "--rounding", "nearest-integer",
        ],
        "",
    );
    assert_eq!(code, 0, "compute failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["target_window_minutes"], 30);
    assert_eq!(json["efficiency_vs_target_pct"], 200.0);
    assert_eq!(json["rounding"], "nearest-integer");
}

#[test]
fn test_record_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) =
        run_cli(dir.path(), &["entry", "record", "--date", "2024-09-01"], NIGHT);
    assert_eq!(code, 0, "record failed: {stderr}");
    assert!(stdout.contains("Entry saved with ID: 1"));
    assert!(stdout.contains("Sleep efficiency: 93.3%"));

    let (stdout, _, code) = run_cli(dir.path(), &["entry", "list", "--json"], "");
    assert_eq!(code, 0, "list failed");
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["entry_date"], "2024-09-01");
    assert_eq!(entries[0]["notes"], "slept well");
    assert_eq!(entries[0]["efficiency_actual_pct"], 93.33);

    let (stdout, _, code) = run_cli(dir.path(), &["entry", "list"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("1. 2024-09-01 - 7.0 hrs sleep"));

    let (stdout, _, code) = run_cli(dir.path(), &["entry", "show", "1"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("\"wake_time_actual\": \"07:10\""));
}

#[test]
fn test_record_exit_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["entry", "record"], "23:00\nexit\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Goodbye"));

    let (stdout, _, _) = run_cli(dir.path(), &["entry", "list"], "");
    assert!(stdout.contains("No entries yet."));
}

#[test]
fn test_record_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["entry", "record", "--date", "yesterday"], NIGHT);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid date"));
}

#[test]
fn test_show_missing_entry_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["entry", "show", "99"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("no entry with id 99"));
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "metrics.rounding"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "two-sig-figs");

    let (_, _, code) = run_cli(
        dir.path(),
        &["config", "set", "metrics.rounding", "nearest-integer"],
        "",
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["entry", "compute", "--bedtime", "23:00", "--wake-target", "07:00", "--total", "420", "--awake", "30", "--latency", "10"],
        "",
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["efficiency_actual_pct"], 91.0);
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "display.missing"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key: display.missing"));
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "display.missing", "1"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_set_accepts_rounding_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "metrics.rounding", "integer"], "");
    assert_eq!(code, 0, "{stderr}");

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "metrics.rounding"], "");
    assert_eq!(stdout.trim(), "nearest-integer");
}

#[test]
fn test_record_with_truncated_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["entry", "record"], "23:00\n07:00\n");
    assert_ne!(code, 0);
    assert!(stderr.contains("input closed"));

    let (stdout, _, _) = run_cli(dir.path(), &["entry", "list"], "");
    assert!(stdout.contains("No entries yet."));
}
