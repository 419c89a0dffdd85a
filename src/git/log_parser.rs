use crate::error::{PulseError, Result};
use crate::types::CommitRecord;
use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

/// `--pretty` argument whose output [`parse_log`] understands:
///
/// ```text
/// commit <hash>
/// Author: <name>
/// Date: Thu, 6 Mar 2025 17:58:12 +0000
/// <subject>
/// ```
pub const LOG_FORMAT: &str = "--pretty=format:commit %H%nAuthor: %an%nDate: %aD%n%s%n";

// `%H` is a full SHA-1 (40) or SHA-256 (64) object name.
static COMMIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^commit ([0-9a-f]{40}|[0-9a-f]{64})$").expect("Invalid static commit regex")
});

/// A commit whose header is still being read.
struct PendingCommit {
    hash: String,
    author: Option<String>,
    timestamp: Option<DateTime<FixedOffset>>,
    message: String,
}

impl PendingCommit {
    fn new(hash: &str) -> Self {
        PendingCommit {
            hash: hash.to_string(),
            author: None,
            timestamp: None,
            message: String::new(),
        }
    }

    fn finish(self) -> Result<CommitRecord> {
        let timestamp = self.timestamp.ok_or_else(|| {
            PulseError::parse(format!("commit {}", self.hash), "no Date line in log block")
        })?;
        Ok(CommitRecord::new(
            self.hash,
            self.author.unwrap_or_default(),
            timestamp,
            self.message,
        ))
    }
}

/// Turns `git log` output produced with [`LOG_FORMAT`] into commit records
/// in emission order. File statistics are left empty.
///
/// A single malformed date fails the whole parse.
pub fn parse_log(raw: &str) -> Result<Vec<CommitRecord>> {
    let mut commits: Vec<CommitRecord> = Vec::new();
    let mut current: Option<PendingCommit> = None;
    let mut block_start = true;

    for line in raw.lines() {
        parse_log_line(line, block_start, &mut commits, &mut current)?;
        block_start = line.trim().is_empty();
    }

    if let Some(c) = current.take() {
        commits.push(c.finish()?);
    }

    Ok(commits)
}

/// `block_start` is true when the previous line was blank. git separates
/// entries with an empty line, so a marker-shaped line in the middle of a
/// block (a subject like `commit 0123...`) is read as the message instead.
fn parse_log_line(
    line: &str,
    block_start: bool,
    commits: &mut Vec<CommitRecord>,
    current: &mut Option<PendingCommit>,
) -> Result<()> {
    let clean = line.trim();

    let marker = if current.is_none() || block_start {
        COMMIT_RE.captures(clean)
    } else {
        None
    };
    if let Some(caps) = marker {
        if let Some(c) = current.take() {
            commits.push(c.finish()?);
        }
        *current = Some(PendingCommit::new(&caps[1]));
        return Ok(());
    }

    // Lines before the first commit marker carry no information.
    let Some(c) = current.as_mut() else {
        return Ok(());
    };

    if c.author.is_none() {
        if let Some(author) = clean.strip_prefix("Author:") {
            c.author = Some(author.trim().to_string());
            return Ok(());
        }
    }

    if c.timestamp.is_none() {
        if let Some(date) = clean.strip_prefix("Date:") {
            c.timestamp = Some(parse_date(date.trim())?);
            return Ok(());
        }
    }

    if !clean.is_empty() && c.message.is_empty() {
        c.message = clean.to_string();
    }

    Ok(())
}

/// Parses git's `%aD` (RFC 2822) dates, keeping the author's offset.
pub fn parse_date(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(text)
        .map_err(|e| PulseError::parse(format!("date \"{text}\""), e.to_string()))
}
