//! Binary-level checks that never touch the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gloc(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gloc").expect("binary should build");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_url_prints_usage() {
    let dir = TempDir::new().unwrap();
    gloc(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_extra_positional_is_rejected() {
    let dir = TempDir::new().unwrap();
    gloc(&dir)
        .args(["https://github.com/a/b", "https://github.com/c/d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_ssh_url_is_rejected_before_fetch() {
    let dir = TempDir::new().unwrap();
    gloc(&dir)
        .arg("git@host:repo.git")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: invalid argument"))
        .stderr(predicate::str::contains("Cloning").not());
}

#[test]
fn test_raw_mode_still_validates_url() {
    let dir = TempDir::new().unwrap();
    gloc(&dir)
        .args(["--raw", "ftp://example.org/repo"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    gloc(&dir)
        .args(["--config", "absent.yaml", "https://github.com/a/b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_config_prefixes_apply() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gloc.yaml"),
        "allowed_prefixes: [\"https://codeberg.org/\"]\n",
    )
    .unwrap();

    gloc(&dir)
        .arg("https://github.com/a/b")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("https://codeberg.org/"));
}

#[test]
fn test_missing_analyzer_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gloc.yaml"), "cloc: gloc-test-no-such-analyzer\n").unwrap();

    gloc(&dir)
        .arg("https://github.com/a/b")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "gloc-test-no-such-analyzer is not installed",
        ));
}
