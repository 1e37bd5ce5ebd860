//! CLI behaviour that needs no network access.
//!
//! Every run points HOME at a scratch directory so a developer's own
//! config file never leaks into the results.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reaction-export").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write_zuliprc(home: &TempDir) -> std::path::PathBuf {
    let path = home.path().join("zuliprc");
    // Port 9 (discard) on localhost: any request fails fast
    fs::write(
        &path,
        "[api]\nemail=bot@example.com\nkey=secret\nsite=http://127.0.0.1:9\n",
    )
    .unwrap();
    path
}

#[test]
fn help_describes_the_tool() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Export emoji reactions"))
        .stdout(predicate::str::contains("--narrow"))
        .stdout(predicate::str::contains("--chunk-size"))
        .stdout(predicate::str::contains("--no-header"));
}

#[test]
fn version_is_printed() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("reaction-export "));
}

#[test]
fn missing_zuliprc_argument_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ZULIPRC"));
}

#[test]
fn malformed_narrow_fails_before_reading_credentials() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["does-not-exist", "--narrow", "streams:public reaction"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid narrow term 'reaction'"));
}

#[test]
fn unreadable_credentials_file_is_reported() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg(home.path().join("missing-zuliprc"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read credentials"));
}

#[test]
fn incomplete_credentials_file_names_the_missing_key() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("zuliprc");
    fs::write(&path, "[api]\nemail=bot@example.com\nsite=chat.example.com\n").unwrap();

    cmd(&home)
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing 'key'"));
}

#[test]
fn out_of_range_chunk_size_is_rejected() {
    let home = TempDir::new().unwrap();
    let zuliprc = write_zuliprc(&home);
    cmd(&home)
        .arg(&zuliprc)
        .args(["--chunk-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk size must be between 1 and 5000"));
}

#[test]
fn unreachable_server_fails_without_output() {
    let home = TempDir::new().unwrap();
    let zuliprc = write_zuliprc(&home);
    cmd(&home)
        .arg(&zuliprc)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Export failed"))
        .stderr(predicate::str::contains("streams"));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[export]"))
        .stdout(predicate::str::contains("narrow = \"streams:public\""))
        .stdout(predicate::str::contains("chunk_size = 1000"))
        .stdout(predicate::str::contains("timeout_secs = 60"));
}

#[test]
fn config_show_reflects_config_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("reaction-export");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[export]\nchunk_size = 250\n").unwrap();

    cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chunk_size = 250"));
}

#[test]
fn invalid_config_file_aborts_export() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("reaction-export");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[export]\nnarrow = \"streams\"\n").unwrap();
    let zuliprc = write_zuliprc(&home);

    cmd(&home)
        .arg(&zuliprc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn config_path_points_into_home() {
    let home = TempDir::new().unwrap();
    let expected = home
        .path()
        .join(".config")
        .join("reaction-export")
        .join("config.toml");
    cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().to_string()));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reaction-export"));
}
