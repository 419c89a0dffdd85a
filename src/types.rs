use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

// ─── Core Git Data ────────────────────────────────────────────────────────────

/// One commit inside the analysis window.
///
/// Created by the log parser with empty file statistics; `files_changed`,
/// `insertions` and `deletions` are filled in afterwards from the commit's
/// diff-stat via [`CommitRecord::merge_stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
    pub files_changed: Vec<String>,
    pub insertions: usize,
    pub deletions: usize,
}

impl CommitRecord {
    pub fn new(
        hash: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        message: impl Into<String>,
    ) -> Self {
        CommitRecord {
            hash: hash.into(),
            author: author.into(),
            timestamp,
            message: message.into(),
            files_changed: Vec::new(),
            insertions: 0,
            deletions: 0,
        }
    }

    /// Appends every stat line's path and adds its counts to the totals.
    pub fn merge_stats(&mut self, stats: &[FileStat]) {
        for stat in stats {
            self.files_changed.push(stat.path.clone());
            self.insertions += stat.insertions;
            self.deletions += stat.deletions;
        }
    }

    /// Calendar day in the commit's own timezone.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// One `path | N +++--` line of `git show --stat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStat {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

// ─── Report ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub contributors: usize,
    pub total_commits: usize,
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub days: Vec<DayGroup>,
}

// ─── Insights ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorActivity {
    pub author: String,
    pub commits: usize,
    pub insertions: usize,
    pub deletions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionCount {
    pub extension: String,
    pub changes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeCommit {
    pub hash: String,
    pub message: String,
    pub files: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Insights {
    /// Ranked by commit count, then by name.
    pub contributors: Vec<ContributorActivity>,
    pub file_types: Vec<ExtensionCount>,
    /// First few large commits in encounter order.
    pub large_commits: Vec<LargeCommit>,
    pub large_commit_total: usize,
}

impl Insights {
    pub fn most_active(&self) -> Option<&ContributorActivity> {
        self.contributors.first()
    }
}

// ─── Digest ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DigestMeta {
    pub repo_path: String,
    pub days: i64,
    pub since: String,
    pub analyzed_at: String,
    pub commit_count: usize,
}

/// Everything produced for one repository and window: the raw records plus
/// the report and insights derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub meta: DigestMeta,
    pub summary: Option<ReportSummary>,
    pub insights: Insights,
    pub commits: Vec<CommitRecord>,
}
