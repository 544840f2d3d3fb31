use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn cryptodip() -> Command {
    cargo_bin_cmd!("cryptodip")
}

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    path.push(format!("cryptodip-cli-{name}-{nanos}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

const VALID: &str = r#"
database = "cli-check.db"

[bot]
currency = "BTC"
buy_amount = 25
dip_percentage = 10
cycle_interval_minutes = 30

[exchange]
type = "gemini"
api_key = "key"
api_secret = "secret"
"#;

#[test]
fn help_lists_flags() {
    cryptodip()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--sandbox"))
        .stdout(predicate::str::contains("--check"));
}

#[test]
fn version_flag_prints_version() {
    cryptodip()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn check_prints_summary_for_valid_config() {
    let path = write_temp_config("valid", VALID);
    let assert = cryptodip()
        .arg("--config")
        .arg(&path)
        .arg("--check")
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("BTC"))
        .stdout(predicate::str::contains("30 minutes"))
        .stdout(predicate::str::contains("https://api.gemini.com"));
}

#[test]
fn sandbox_check_points_at_sandbox() {
    let path = write_temp_config("sandbox", VALID);
    let assert = cryptodip()
        .arg("-c")
        .arg(&path)
        .args(["--sandbox", "--check"])
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .success()
        .stdout(predicate::str::contains("https://api.sandbox.gemini.com"));
}

#[test]
fn missing_config_file_exits_nonzero() {
    cryptodip()
        .args(["--config", "/nonexistent/cryptodip.toml", "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn invalid_config_reports_field() {
    let path = write_temp_config(
        "invalid",
        "[bot]\ncurrency = \"BTC\"\nbuy_amount = 25\ndip_percentage = 0\n\n[exchange]\ntype = \"gemini\"\napi_key = \"k\"\napi_secret = \"s\"\n",
    );
    let assert = cryptodip()
        .arg("--config")
        .arg(&path)
        .arg("--check")
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .failure()
        .stderr(predicate::str::contains("dip_percentage"));
}
