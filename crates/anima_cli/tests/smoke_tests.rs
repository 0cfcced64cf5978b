//! CLI smoke tests: basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_anima"));
    cmd.env_remove("ANIMA_CONFIG")
        .env_remove("ANIMA_INITIAL_AGE")
        .env_remove("ANIMA_SEED")
        .env_remove("ANIMA_HISTORY_CAPACITY")
        .env("RUST_LOG", "warn");
    cmd
}

fn last_json_line(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    let line = text.lines().last().expect("no output");
    serde_json::from_str(line).expect("output line should be JSON")
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("anima"),
        "Expected crate name in --version output"
    );
}

#[test]
fn test_praise_run_emits_json_snapshots() {
    let output = cli_bin()
        .args(["--ticks", "5", "--trigger", "0:praise", "--json"])
        .output()
        .expect("failed to run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let lines = String::from_utf8_lossy(&output.stdout).lines().count();
    assert_eq!(lines, 5, "one snapshot per tick");

    let snap = last_json_line(&output.stdout);
    assert_eq!(snap["age"].as_f64(), Some(5.0));
    assert_eq!(snap["tick"].as_u64(), Some(5));
    let emotions = snap["active_emotions"].as_array().unwrap();
    assert!(emotions.iter().any(|e| e["kind"] == "delighted"));
}

#[test]
fn test_signals_and_every() {
    let output = cli_bin()
        .args(["--ticks", "6", "--every", "3", "--signal", "heat=1.0", "--json"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let lines = String::from_utf8_lossy(&output.stdout).lines().count();
    assert_eq!(lines, 2);
}

#[test]
fn test_text_output_describes_mood() {
    let output = cli_bin().args(["--ticks", "1"]).output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mood: neutral"), "got: {stdout}");
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let output = cli_bin()
        .args(["--config", "/tmp/nonexistent_anima_config_12345.toml", "--ticks", "1"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}

#[test]
fn test_invalid_config_is_rejected() {
    let path = std::env::temp_dir().join(format!("anima_bad_config_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[[traits]]
name = "lonely_trait"
core = 0.5
facets = [{ name = "only", weight = 1.0 }]
"#,
    )
    .unwrap();
    let output = cli_bin()
        .arg("--config")
        .arg(&path)
        .args(["--ticks", "1"])
        .output()
        .expect("failed to run");
    let _ = std::fs::remove_file(&path);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("traits"), "stderr: {stderr}");
}

#[test]
fn test_malformed_signal_is_a_usage_error() {
    let output = cli_bin()
        .args(["--signal", "heat"])
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
}
