use crate::types::{CommitRecord, DayGroup, ReportSummary};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Aggregates commits into totals and per-day groups.
///
/// Works on a private copy sorted newest first, so the caller's slice keeps
/// its order. Days are keyed in each commit's own timezone and listed most
/// recent first; the period runs from the oldest to the newest of those days.
/// Returns `None` for an empty slice.
pub fn summarize(commits: &[CommitRecord]) -> Option<ReportSummary> {
    if commits.is_empty() {
        return None;
    }

    let mut sorted = commits.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let files: HashSet<&str> = sorted
        .iter()
        .flat_map(|c| c.files_changed.iter().map(|f| f.as_str()))
        .collect();
    let authors: HashSet<&str> = sorted.iter().map(|c| c.author.as_str()).collect();
    let insertions = sorted.iter().map(|c| c.insertions).sum();
    let deletions = sorted.iter().map(|c| c.deletions).sum();

    let contributors = authors.len();
    let files_changed = files.len();
    let total_commits = sorted.len();

    let mut by_day: BTreeMap<NaiveDate, Vec<CommitRecord>> = BTreeMap::new();
    for commit in sorted {
        by_day.entry(commit.day()).or_default().push(commit);
    }

    let days: Vec<DayGroup> = by_day
        .into_iter()
        .rev()
        .map(|(day, commits)| DayGroup { day, commits })
        .collect();

    // Mixed offsets can put the oldest instant on a later local day than a
    // newer one, so the period spans the day groups rather than the instants.
    let period_end = days.first()?.day;
    let period_start = days.last()?.day;

    Some(ReportSummary {
        period_start,
        period_end,
        contributors,
        total_commits,
        files_changed,
        insertions,
        deletions,
        days,
    })
}
