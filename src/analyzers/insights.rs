use crate::types::{CommitRecord, ContributorActivity, ExtensionCount, Insights, LargeCommit};
use std::collections::HashMap;

/// A commit touching more than this many files is "large".
pub const LARGE_COMMIT_FILES: usize = 5;
/// How many large commits are listed.
pub const LARGE_COMMITS_SHOWN: usize = 3;
/// Histogram key for paths without an extension.
pub const NO_EXTENSION: &str = "no_extension";

/// Computes contributor ranking, the per-extension change histogram and the
/// large-commit list. Result does not depend on input order except for which
/// large commits are listed first.
pub fn generate_insights(commits: &[CommitRecord]) -> Insights {
    Insights {
        contributors: rank_contributors(commits),
        file_types: extension_histogram(commits),
        large_commits: commits
            .iter()
            .filter(|c| is_large(c))
            .take(LARGE_COMMITS_SHOWN)
            .map(|c| LargeCommit {
                hash: c.hash.clone(),
                message: c.message.clone(),
                files: c.files_changed.len(),
            })
            .collect(),
        large_commit_total: commits.iter().filter(|c| is_large(c)).count(),
    }
}

pub fn is_large(commit: &CommitRecord) -> bool {
    commit.files_changed.len() > LARGE_COMMIT_FILES
}

/// Commit count per author, highest first; equal counts sort by name.
fn rank_contributors(commits: &[CommitRecord]) -> Vec<ContributorActivity> {
    let mut by_author: HashMap<&str, ContributorActivity> = HashMap::new();
    for commit in commits {
        let entry = by_author
            .entry(commit.author.as_str())
            .or_insert_with(|| ContributorActivity {
                author: commit.author.clone(),
                commits: 0,
                insertions: 0,
                deletions: 0,
            });
        entry.commits += 1;
        entry.insertions += commit.insertions;
        entry.deletions += commit.deletions;
    }

    let mut ranked: Vec<ContributorActivity> = by_author.into_values().collect();
    ranked.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.author.cmp(&b.author)));
    ranked
}

fn extension_histogram(commits: &[CommitRecord]) -> Vec<ExtensionCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for file in commits.iter().flat_map(|c| c.files_changed.iter()) {
        *counts.entry(extension_of(file)).or_insert(0) += 1;
    }

    let mut histogram: Vec<ExtensionCount> = counts
        .into_iter()
        .map(|(extension, changes)| ExtensionCount { extension, changes })
        .collect();
    histogram.sort_by(|a, b| b.changes.cmp(&a.changes).then_with(|| a.extension.cmp(&b.extension)));
    histogram
}

/// Extension of the last path component including its dot (`"a/b.go"` →
/// `".go"`). Leading dots do not start an extension, so `.gitignore` and
/// `README` both map to [`NO_EXTENSION`].
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    let skip = name.len() - name.trim_start_matches('.').len();
    match name[skip..].rfind('.') {
        Some(i) => name[skip + i..].to_string(),
        None => NO_EXTENSION.to_string(),
    }
}
