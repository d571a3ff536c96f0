//! Integration tests for command-line parsing and the small commands

mod common;

use assert_cmd::Command;
use common::cmd_with_temp_home;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("offline-mirror").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("sets"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn test_download_help() {
    let mut cmd = Command::cargo_bin("offline-mirror").unwrap();

    cmd.args(["download", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--no-bootstrap"))
        .stdout(predicate::str::contains("--repository"))
        .stdout(predicate::str::contains(
            "Resolve this dependency instead of the manifest's sets",
        ));
}

#[test]
fn test_download_requires_output() {
    let mut cmd = Command::cargo_bin("offline-mirror").unwrap();

    cmd.arg("download")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_path_prints_mirror_directory() {
    let mut cmd = Command::cargo_bin("offline-mirror").unwrap();

    cmd.args(["path", "com.example:lib:1.2", "-o", "mirror"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mirror/com/example/lib/1.2"));
}

#[test]
fn test_path_rejects_malformed_coordinate() {
    let mut cmd = Command::cargo_bin("offline-mirror").unwrap();

    cmd.args(["path", "com.example:lib"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate"));
}

#[test]
fn test_sets_lists_manifest_sets() {
    let project = TempDir::new().unwrap();
    std::fs::write(
        project.path().join("offline-mirror.toml"),
        r#"
        [sets.runtime]
        dependencies = ["com.example:lib:1.2"]

        [bootstrap.classpath]
        dependencies = ["org.example:plugin:3.0"]
        "#,
    )
    .unwrap();

    let (mut cmd, _home) = cmd_with_temp_home();
    cmd.current_dir(project.path())
        .arg("sets")
        .assert()
        .success()
        .stdout(predicate::str::contains("runtime: 1 dependencies"))
        .stdout(predicate::str::contains("classpath: 1 dependencies"));
}

#[test]
fn test_sets_without_manifest_fails() {
    let project = TempDir::new().unwrap();
    let (mut cmd, _home) = cmd_with_temp_home();

    cmd.current_dir(project.path())
        .arg("sets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("offline-mirror.toml"));
}

#[test]
fn test_invalid_manifest_reports_all_errors() {
    let project = TempDir::new().unwrap();
    let manifest = project.path().join("broken.toml");
    std::fs::write(
        &manifest,
        "[sets.runtime]\ndependencies = [\"nope\", \"a:b\"]\n",
    )
    .unwrap();

    let (mut cmd, _home) = cmd_with_temp_home();
    cmd.args(["sets", "-m"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Manifest validation failed"))
        .stderr(predicate::str::contains("'nope'"))
        .stderr(predicate::str::contains("'a:b'"));
}
