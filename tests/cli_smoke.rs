mod common;

use assert_cmd::prelude::*;
use common::{commit_files, has_git, init_repo, lines};
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn pulse() -> Command {
    Command::cargo_bin("git-pulse").unwrap()
}

#[test]
fn text_format_prints_report() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_repo(dir.path());
    commit_files(dir.path(), &[("src/app.py", &lines(3))], "Add app", "Ada", 0);

    pulse()
        .arg(dir.path())
        .args(["--format", "text", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("📊 Weekly Update Summary"))
        .stdout(predicate::str::contains("• Add app (Ada)"))
        .stdout(predicate::str::contains("Modified: src/app.py"))
        .stdout(predicate::str::contains("- .py: 1 changes"));
}

#[test]
fn text_format_reports_empty_window() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_repo(dir.path());
    commit_files(dir.path(), &[("a.txt", "a\n")], "Old", "Ada", 30);

    pulse()
        .arg(dir.path())
        .args(["--format", "text", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No commits found in the repository at"))
        .stdout(predicate::str::contains("in the last 7 days."));
}

#[test]
fn json_format_writes_file() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_repo(dir.path());
    commit_files(dir.path(), &[("lib.rs", &lines(2))], "One", "Ada", 0);
    commit_files(dir.path(), &[("lib.rs", &lines(4))], "Two", "Grace", 0);

    let out = dir.path().join("pulse.json");
    pulse()
        .arg(dir.path())
        .args(["--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();

    let data = std::fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(v["meta"]["commit_count"], 2);
    assert_eq!(v["summary"]["contributors"], 2);
    assert_eq!(v["commits"].as_array().unwrap().len(), 2);
}

#[test]
fn config_file_in_repo_is_honored() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_repo(dir.path());
    commit_files(dir.path(), &[("a.txt", "a\n")], "Ten days back", "Ada", 10);
    std::fs::write(dir.path().join(".git-pulse.yml"), "days: 14\nformat: text\n").unwrap();

    pulse()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ten days back (Ada)"));
}

#[test]
fn not_a_repository_fails() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    pulse()
        .arg(dir.path())
        .args(["--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot access repository"));
}

#[test]
fn invalid_format_is_rejected() {
    let dir = tempdir().unwrap();
    pulse()
        .arg(dir.path())
        .args(["--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("format"));
}

#[test]
fn generate_config_prints_template() {
    pulse()
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# git-pulse configuration file"));
}
