//! Integration tests for snapzip-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn snapzip_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("snapzip");
    cmd.env_remove("SNAPZIP_SOURCE")
        .env_remove("SNAPZIP_DEST")
        .env_remove("SNAPZIP_EXCLUDE")
        .env_remove("RUST_LOG");
    cmd
}

/// Builds `proj/` with a.txt (5 B), .git/x (100 B) and sub/b.txt (10 B).
fn sample_project(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("proj");
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::write(root.join(".git/x"), vec![b'g'; 100]).unwrap();
    fs::write(root.join("sub/b.txt"), "0123456789").unwrap();
    root
}

fn only_archive(dir: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = fs::read_dir(dir)
        .expect("destination exists")
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one archive");
    entries.into_iter().next().unwrap()
}

fn archive_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_version_flag() {
    snapzip_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("snapzip"));
}

#[test]
fn test_help_flag() {
    snapzip_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("DEFAULT EXCLUDES"));
}

#[test]
fn test_backup_help() {
    snapzip_cmd()
        .args(["backup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--compression"))
        .stdout(predicate::str::contains("--exclude"));
}

#[test]
fn test_backup_creates_archive() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);
    let dest = temp.path().join("backups");

    snapzip_cmd()
        .arg("backup")
        .arg("--source")
        .arg(&source)
        .arg("--dest")
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created:"))
        .stdout(predicate::str::contains("proj-"));

    let archive = only_archive(&dest);
    let name = archive.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("proj-") && name.ends_with(".zip"));
    assert_eq!(archive_names(&archive), vec!["proj/a.txt", "proj/sub/b.txt"]);
}

#[test]
fn test_backup_deflate_with_level() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);
    let dest = temp.path().join("out");

    snapzip_cmd()
        .arg("backup")
        .arg("-s")
        .arg(&source)
        .arg("-d")
        .arg(&dest)
        .args(["-c", "deflate", "-l", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deflate (level 9)"));

    assert_eq!(archive_names(&only_archive(&dest)).len(), 2);
}

#[test]
fn test_backup_custom_exclude() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);
    let dest = temp.path().join("out");

    snapzip_cmd()
        .arg("backup")
        .arg("-s")
        .arg(&source)
        .arg("-d")
        .arg(&dest)
        .args(["--exclude", "sub"])
        .assert()
        .success();

    assert_eq!(
        archive_names(&only_archive(&dest)),
        vec!["proj/.git/x", "proj/a.txt"]
    );
}

#[test]
fn test_backup_from_environment() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);
    let dest = temp.path().join("env-out");

    snapzip_cmd()
        .arg("backup")
        .env("SNAPZIP_SOURCE", &source)
        .env("SNAPZIP_DEST", &dest)
        .assert()
        .success();

    assert_eq!(archive_names(&only_archive(&dest)).len(), 2);
}

#[test]
fn test_backup_json_output() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);
    let dest = temp.path().join("out");

    let output = snapzip_cmd()
        .arg("--json")
        .arg("backup")
        .arg("-s")
        .arg(&source)
        .arg("-d")
        .arg(&dest)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "backup");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["bytes_read"], 15);
    assert_eq!(json["data"]["compression"], "store");
}

#[test]
fn test_backup_missing_source_fails() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("out");

    snapzip_cmd()
        .arg("backup")
        .arg("-s")
        .arg(temp.path().join("missing"))
        .arg("-d")
        .arg(&dest)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid source"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!dest.exists());
}

#[test]
fn test_backup_empty_source_fails() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("empty");
    fs::create_dir_all(source.join("node_modules")).unwrap();
    fs::write(source.join("node_modules/x.js"), "x").unwrap();

    snapzip_cmd()
        .arg("backup")
        .arg("-s")
        .arg(&source)
        .arg("-d")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Nothing to back up"));
}

#[test]
fn test_backup_level_requires_deflate() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);

    snapzip_cmd()
        .arg("backup")
        .arg("-s")
        .arg(&source)
        .arg("-d")
        .arg(temp.path().join("out"))
        .args(["--level", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--compression deflate"));
}

#[test]
fn test_backup_json_error() {
    let temp = TempDir::new().unwrap();

    let output = snapzip_cmd()
        .arg("--json")
        .arg("backup")
        .arg("-s")
        .arg(temp.path().join("missing"))
        .arg("-d")
        .arg(temp.path().join("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "backup");
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().contains("Invalid source"));
}

#[test]
fn test_quiet_backup_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);

    snapzip_cmd()
        .arg("--quiet")
        .arg("backup")
        .arg("-s")
        .arg(&source)
        .arg("-d")
        .arg(temp.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_scan_reports_totals() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);

    snapzip_cmd()
        .arg("scan")
        .arg("-s")
        .arg(&source)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files:            2"))
        .stdout(predicate::str::contains("15 B"))
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains(".git").not());
}

#[test]
fn test_scan_json_output() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);

    let output = snapzip_cmd()
        .args(["--json", "scan", "--list", "-s"])
        .arg(&source)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "scan");
    assert_eq!(json["data"]["root_name"], "proj");
    assert_eq!(json["data"]["files"], 2);
    assert_eq!(json["data"]["total_bytes"], 15);
    assert_eq!(json["data"]["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();
    let source = sample_project(&temp);

    snapzip_cmd()
        .args(["-v", "scan", "-s"])
        .arg(&source)
        .assert()
        .success()
        .stderr(predicate::str::contains("scan complete"));
}

#[test]
fn test_completion_bash() {
    snapzip_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapzip"));
}
