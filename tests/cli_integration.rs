use assert_cmd::Command;
use predicates::prelude::*;

fn duim() -> Command {
    Command::cargo_bin("duim").unwrap()
}

#[test]
fn shows_help() {
    duim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("disk usage report"))
        .stdout(predicate::str::contains("--human-readable"))
        .stdout(predicate::str::contains("--length"));
}

#[test]
fn shows_version() {
    duim()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn verbose_flag_accepted() {
    duim().args(["-vvv", "."]).assert().success();
}

#[test]
fn invalid_config_path_fails() {
    duim()
        .args(["--config", "/nonexistent/path.toml", "."])
        .assert()
        .failure();
}

#[test]
fn invalid_length_fails() {
    duim()
        .args(["-l", "wide", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn unknown_backend_fails() {
    duim()
        .args(["--backend", "ncdu", "."])
        .assert()
        .failure();
}

#[test]
fn generates_completions() {
    duim()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("duim"));
}

#[test]
fn default_target_is_current_directory() {
    duim()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Disk usage for: .\n"))
        .stdout(predicate::str::contains("Total:"));
}
