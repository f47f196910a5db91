//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command against `home` and return (exit code, stdout, stderr).
fn run_cli(home: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_flightdeck"))
        .args(args)
        .env("FLIGHTDECK_HOME", home.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn summary(home: &TempDir) -> serde_json::Value {
    let (code, stdout, _) = run_cli(home, &["stats", "summary"]);
    assert_eq!(code, 0, "Stats summary failed");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_stats_summary_empty() {
    let home = TempDir::new().unwrap();
    let stats = summary(&home);
    assert_eq!(stats["flightCount"], 0);
    assert_eq!(stats["totalMinutes"], 0.0);
    assert_eq!(stats["recent"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_stats_show_empty() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["stats", "show"]);
    assert_eq!(code, 0, "Stats show failed");
    assert!(stdout.contains("No flights yet"));
    assert!(stdout.contains("Glasgow"));
}

#[test]
fn test_fly_rejects_missing_origin() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["fly", "  ", "DXB", "25"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Enter an origin."), "{stderr}");
}

#[test]
fn test_fly_rejects_bad_duration() {
    let home = TempDir::new().unwrap();
    for minutes in ["0", "-5", "soon"] {
        let (code, _, stderr) = run_cli(&home, &["fly", "LHR", "DXB", minutes]);
        assert_eq!(code, 1, "{minutes}");
        assert!(stderr.contains("Duration must be greater than 0 minutes."), "{stderr}");
    }
    assert_eq!(summary(&home)["flightCount"], 0);
}

#[test]
fn test_fly_one_second_lands_and_records() {
    let home = TempDir::new().unwrap();
    // 0.0167 min rounds to one countable second.
    let (code, stdout, stderr) = run_cli(&home, &["fly", "LHR", "DXB", "0.0167", "--json"]);
    assert_eq!(code, 0, "Fly failed: {stderr}");

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("event line is JSON"))
        .collect();
    assert_eq!(events.first().map(|e| e["type"].clone()), Some("departed".into()));
    let last = events.last().unwrap();
    assert_eq!(last["type"], "ended");
    assert_eq!(last["record"]["status"], "completed");
    assert_eq!(last["record"]["origin"], "LHR");

    let stats = summary(&home);
    assert_eq!(stats["flightCount"], 1);
    assert_eq!(stats["completedCount"], 1);
    assert_eq!(stats["abortedCount"], 0);
    assert_eq!(stats["streakDays"], 1);
    assert_eq!(stats["recent"][0]["destination"], "DXB");
}

#[test]
fn test_style_roundtrip() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["style", "get"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Standard");

    let (code, _, _) = run_cli(&home, &["style", "set", "Terra"]);
    assert_eq!(code, 0, "Style set failed");

    let (_, stdout, _) = run_cli(&home, &["style", "get"]);
    assert_eq!(stdout.trim(), "Terra");

    let (code, stdout, _) = run_cli(&home, &["style", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.lines().any(|l| l.starts_with('*') && l.contains("Terra")));
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["config", "get", "ui.home_city"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "Glasgow");

    let (code, _, _) = run_cli(&home, &["config", "set", "ui.home_city", "Oslo"]);
    assert_eq!(code, 0, "Config set failed");

    let (_, stdout, _) = run_cli(&home, &["config", "get", "ui.home_city"]);
    assert_eq!(stdout.trim(), "Oslo");

    let (code, _, stderr) = run_cli(&home, &["config", "get", "ui.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_list() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["logging"]["filter"], "warn");
}
