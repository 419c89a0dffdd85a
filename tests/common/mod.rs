#![allow(dead_code)]

use chrono::{Duration, Utc};
use std::fs;
use std::path::Path;
use std::process::Command;

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str], author: &str, unix_ts: i64) {
    let date = format!("{unix_ts} +0000");
    let email = format!("{}@example.com", author.to_lowercase().replace(' ', "."));
    let status = Command::new("git")
        .args(["-c", "commit.gpgsign=false", "-c", "core.autocrlf=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", &email)
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_NAME", author)
        .env("GIT_COMMITTER_EMAIL", &email)
        .env("GIT_COMMITTER_DATE", &date)
        .output()
        .unwrap();
    assert!(
        status.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&status.stderr)
    );
}

pub fn init_repo(dir: &Path) {
    git(dir, &["init", "-q"], "Setup", Utc::now().timestamp());
}

/// Writes `files` (path, content) and commits them `days_ago` days back.
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str, author: &str, days_ago: i64) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
    let ts = (Utc::now() - Duration::days(days_ago)).timestamp();
    git(dir, &["add", "."], author, ts);
    git(dir, &["commit", "-q", "-m", message], author, ts);
}

/// `n` newline-terminated lines.
pub fn lines(n: usize) -> String {
    (0..n).map(|i| format!("line {i}\n")).collect()
}
