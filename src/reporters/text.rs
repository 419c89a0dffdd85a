//! Plain-text rendering of reports and insights.
//!
//! The output carries no color codes so it can be fed straight into another
//! program, e.g. a summarization prompt.
use crate::analyzers::summary::summarize;
use crate::types::{CommitRecord, Insights, ReportSummary};

/// Returned by [`generate_report`] for an empty commit list.
pub const NO_COMMITS: &str = "No commits found in the specified time period.";

const RULE_WIDTH: usize = 30;
const FILES_LISTED: usize = 3;

/// Summarizes `commits` as a day-by-day text report.
///
/// The slice is not reordered; sorting happens on a copy, so calling this
/// twice on the same input yields the same text.
pub fn generate_report(commits: &[CommitRecord]) -> String {
    match summarize(commits) {
        Some(summary) => render_summary(&summary),
        None => NO_COMMITS.to_string(),
    }
}

pub fn render_summary(summary: &ReportSummary) -> String {
    let mut lines = vec![
        "📊 Weekly Update Summary".to_string(),
        "=".repeat(RULE_WIDTH),
        format!(
            "📅 Period: {} to {}",
            summary.period_start.format("%Y-%m-%d"),
            summary.period_end.format("%Y-%m-%d")
        ),
        format!("👥 Contributors: {}", summary.contributors),
        format!("📝 Total Commits: {}", summary.total_commits),
        format!("📂 Files Changed: {}", summary.files_changed),
        format!("📈 Lines Added: {}", summary.insertions),
        format!("📉 Lines Removed: {}", summary.deletions),
        "\n📋 Daily Breakdown:".to_string(),
    ];

    for group in &summary.days {
        lines.push(format!("\n🗓️ {}", group.day.format("%Y-%m-%d")));
        for commit in &group.commits {
            lines.push(format!("  • {} ({})", commit.message, commit.author));
            if !commit.files_changed.is_empty() {
                lines.push(format!("    Modified: {}", files_summary(&commit.files_changed)));
            }
        }
    }

    lines.join("\n")
}

/// `"a, b, c and 2 more"`
pub fn files_summary(files: &[String]) -> String {
    let mut out = files
        .iter()
        .take(FILES_LISTED)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if files.len() > FILES_LISTED {
        out.push_str(&format!(" and {} more", files.len() - FILES_LISTED));
    }
    out
}

pub fn render_insights(insights: &Insights) -> String {
    let mut lines = vec![
        "\nAdditional Insights".to_string(),
        "=".repeat(RULE_WIDTH),
        "\nTeam Collaboration:".to_string(),
        format!("- {} contributors were active", insights.contributors.len()),
    ];
    if let Some(top) = insights.most_active() {
        lines.push(format!("- Most active contributor: {}", top.author));
    }

    lines.push("\nFile Type Distribution:".to_string());
    for entry in &insights.file_types {
        lines.push(format!("- {}: {} changes", entry.extension, entry.changes));
    }

    if !insights.large_commits.is_empty() {
        lines.push("\nNotable Large Changes:".to_string());
        for c in &insights.large_commits {
            lines.push(format!("- {} ({} files)", c.message, c.files));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::insights::generate_insights;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn commit(hash: &str, author: &str, date: &str, message: &str, files: &[&str]) -> CommitRecord {
        let ts = DateTime::parse_from_rfc2822(date).unwrap();
        let mut c = CommitRecord::new(hash, author, ts, message);
        c.files_changed = files.iter().map(|s| s.to_string()).collect();
        c
    }

    #[test]
    fn test_empty_report_is_fixed_message() {
        assert_eq!(generate_report(&[]), NO_COMMITS);
    }

    #[test]
    fn test_report_layout() {
        let mut a = commit(
            "a",
            "Ada",
            "Thu, 6 Mar 2025 17:58:12 +0000",
            "Add parser",
            &["src/a.rs", "src/b.rs", "src/c.rs", "src/d.rs", "src/e.rs"],
        );
        a.insertions = 10;
        a.deletions = 4;
        let b = commit("b", "Grace", "Wed, 5 Mar 2025 09:00:00 +0000", "Fix typo", &["README"]);
        let c = commit("c", "Ada", "Thu, 6 Mar 2025 08:00:00 +0000", "Empty", &[]);

        let expected = "\
📊 Weekly Update Summary
==============================
📅 Period: 2025-03-05 to 2025-03-06
👥 Contributors: 2
📝 Total Commits: 3
📂 Files Changed: 6
📈 Lines Added: 10
📉 Lines Removed: 4

📋 Daily Breakdown:

🗓️ 2025-03-06
  • Add parser (Ada)
    Modified: src/a.rs, src/b.rs, src/c.rs and 2 more
  • Empty (Ada)

🗓️ 2025-03-05
  • Fix typo (Grace)
    Modified: README";

        assert_eq!(generate_report(&[b, c, a]), expected);
    }

    #[test]
    fn test_report_is_idempotent() {
        let commits = vec![
            commit("x", "Ada", "Mon, 3 Mar 2025 10:00:00 +0000", "older", &["a.rs"]),
            commit("y", "Ada", "Thu, 6 Mar 2025 10:00:00 +0000", "newer", &["b.rs"]),
        ];
        let first = generate_report(&commits);
        let second = generate_report(&commits);
        assert_eq!(first, second);
        assert_eq!(commits[0].hash, "x", "input order must survive");
    }

    #[test]
    fn test_files_summary_limits() {
        let three: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(files_summary(&three), "a, b, c");
        let four: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(files_summary(&four), "a, b, c and 1 more");
    }

    #[test]
    fn test_insights_layout() {
        let big: Vec<String> = (0..6).map(|i| format!("src/m{i}.rs")).collect();
        let big_refs: Vec<&str> = big.iter().map(String::as_str).collect();
        let commits = vec![
            commit("a", "Grace", "Thu, 6 Mar 2025 10:00:00 +0000", "Big refactor", &big_refs),
            commit("b", "Ada", "Thu, 6 Mar 2025 11:00:00 +0000", "Docs", &["README", "docs/x.md"]),
            commit("c", "Grace", "Thu, 6 Mar 2025 12:00:00 +0000", "Tweak", &["src/m0.rs"]),
        ];

        let expected = "
Additional Insights
==============================

Team Collaboration:
- 2 contributors were active
- Most active contributor: Grace

File Type Distribution:
- .rs: 7 changes
- .md: 1 changes
- no_extension: 1 changes

Notable Large Changes:
- Big refactor (6 files)";

        assert_eq!(render_insights(&generate_insights(&commits)), expected);
    }

    #[test]
    fn test_insights_without_large_commits_has_no_section() {
        let commits = vec![commit("a", "Ada", "Thu, 6 Mar 2025 10:00:00 +0000", "Small", &["a.rs"])];
        let text = render_insights(&generate_insights(&commits));
        assert!(!text.contains("Notable Large Changes"));
    }
}
