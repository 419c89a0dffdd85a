use crate::analyzers::insights::generate_insights;
use crate::analyzers::summary::summarize;
use crate::error::Result;
use crate::git::repository::{since_date, Analyzer, AnalyzerOptions};
use crate::reporters::text::{render_insights, render_summary};
use crate::types::{CommitRecord, Digest, DigestMeta};
use std::path::Path;

/// Analyzes `repo_path` over the last `days` days and derives the report
/// summary and insights from the same records.
pub fn digest<P: AsRef<Path>>(repo_path: P, days: i64, options: &AnalyzerOptions) -> Result<Digest> {
    let analyzer = Analyzer::with_options(repo_path.as_ref(), options);
    let since = since_date(days);
    let commits = analyzer.analyze_since(&since)?;
    Ok(Digest::from_window(analyzer.location(), days, since, commits))
}

impl Digest {
    /// Builds a digest whose cutoff is `since_date(days)` at call time.
    pub fn from_commits(repo_path: &Path, days: i64, commits: Vec<CommitRecord>) -> Self {
        Self::from_window(repo_path, days, since_date(days), commits)
    }

    /// Builds a digest for commits read with `--since=<since>`.
    pub fn from_window(
        repo_path: &Path,
        days: i64,
        since: String,
        commits: Vec<CommitRecord>,
    ) -> Self {
        Digest {
            meta: DigestMeta {
                repo_path: repo_path.display().to_string(),
                days,
                since,
                analyzed_at: chrono::Utc::now().to_rfc3339(),
                commit_count: commits.len(),
            },
            summary: summarize(&commits),
            insights: generate_insights(&commits),
            commits,
        }
    }

    /// Report followed by insights, or a one-line notice when the window
    /// holds no commits.
    pub fn render_text(&self) -> String {
        match &self.summary {
            Some(summary) => format!(
                "{}\n{}",
                render_summary(summary),
                render_insights(&self.insights)
            ),
            None => format!(
                "No commits found in the repository at {} in the last {} days.",
                self.meta.repo_path, self.meta.days
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::text::generate_report;
    use chrono::DateTime;

    fn commit(hash: &str, author: &str, files: &[&str]) -> CommitRecord {
        let ts = DateTime::parse_from_rfc2822("Thu, 6 Mar 2025 10:00:00 +0000").unwrap();
        let mut c = CommitRecord::new(hash, author, ts, format!("msg {hash}"));
        c.files_changed = files.iter().map(|s| s.to_string()).collect();
        c
    }

    #[test]
    fn test_empty_digest_text() {
        let d = Digest::from_commits(Path::new("/tmp/repo"), 7, Vec::new());
        assert!(d.summary.is_none());
        assert_eq!(d.meta.commit_count, 0);
        assert_eq!(
            d.render_text(),
            "No commits found in the repository at /tmp/repo in the last 7 days."
        );
    }

    #[test]
    fn test_text_is_report_then_insights() {
        let commits = vec![commit("a", "Ada", &["x.rs"]), commit("b", "Grace", &["y.md"])];
        let report = generate_report(&commits);
        let d = Digest::from_commits(Path::new("repo"), 7, commits);
        let text = d.render_text();
        assert!(text.starts_with(&report));
        assert!(text.contains("Additional Insights"));
        assert_eq!(d.meta.commit_count, 2);
    }

    #[test]
    fn test_meta_keeps_the_cutoff_it_was_given() {
        let d = Digest::from_window(
            Path::new("repo"),
            7,
            "2025-02-27".to_string(),
            vec![commit("a", "Ada", &["x.rs"])],
        );
        assert_eq!(d.meta.since, "2025-02-27");
        assert_eq!(d.meta.days, 7);
    }

    #[test]
    fn test_digest_serializes_to_json() {
        let d = Digest::from_commits(Path::new("repo"), 3, vec![commit("a", "Ada", &["x.rs"])]);
        let value = serde_json::to_value(&d).expect("digest should serialize");
        assert_eq!(value["meta"]["commit_count"], 1);
        assert_eq!(value["commits"][0]["hash"], "a");
        assert_eq!(value["commits"][0]["timestamp"], "2025-03-06T10:00:00+00:00");
        assert_eq!(value["insights"]["file_types"][0]["extension"], ".rs");
    }
}
