use std::fs;

use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn default_config_is_valid() {
    let mut cmd = cargo::cargo_bin_cmd!("formbridge");
    cmd.arg("--check-config")
        .assert()
        .success()
        .stdout(contains("configuration ok (1 account(s))"))
        .stdout(contains("demo@formbridge.dev"));
}

#[test]
fn accounts_are_read_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("formbridge.toml");
    fs::write(
        &path,
        r#"
[ui]
show_help = false

[[accounts]]
name = "Ana"
email = "ana@example.com"
password = "123456"

[[accounts]]
name = "Bia"
email = "bia@example.com"
password = "654321"
"#,
    )
    .expect("write config");

    let mut cmd = cargo::cargo_bin_cmd!("formbridge");
    cmd.arg("--check-config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("configuration ok (2 account(s))"))
        .stdout(contains("bia@example.com"));
}

#[test]
fn duplicate_accounts_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("formbridge.toml");
    fs::write(
        &path,
        r#"
[[accounts]]
name = "Ana"
email = "ana@example.com"
password = "1"

[[accounts]]
name = "Ana again"
email = "ANA@example.com"
password = "2"
"#,
    )
    .expect("write config");

    let mut cmd = cargo::cargo_bin_cmd!("formbridge");
    cmd.arg("--check-config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("failed to load"));
}

#[test]
fn missing_config_file_is_reported() {
    let mut cmd = cargo::cargo_bin_cmd!("formbridge");
    cmd.args(["--check-config", "--config", "/definitely/not/here.toml"])
        .assert()
        .failure()
        .stderr(contains("--config"));
}
