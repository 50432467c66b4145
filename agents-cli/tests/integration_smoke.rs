//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("agents-api").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("ping"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("agents-api").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--max-connections"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_serve_without_database_url_fails() {
    let mut cmd = Command::cargo_bin("agents-api").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_remove("DATABASE_URL")
        .arg("serve")
        .arg("--bind")
        .arg("127.0.0.1:0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("agents-api").unwrap();
    cmd.arg("serve").arg("--bind").arg("not-an-address");

    cmd.assert().failure();
}

#[test]
fn test_ping_requires_database_url() {
    let mut cmd = Command::cargo_bin("agents-api").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_remove("DATABASE_URL")
        .arg("ping");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--database-url"));
}
