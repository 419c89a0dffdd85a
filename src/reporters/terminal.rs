use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use crate::reporters::text::{render_insights, render_summary};
use crate::types::{ContributorActivity, Digest};

pub fn report_terminal(digest: &Digest) {
    eprintln!();
    println!(
        "{} — {} ({} day window, since {})",
        "📊 git-pulse".cyan().bold(),
        digest.meta.repo_path.bright_black(),
        digest.meta.days.to_string().bright_black(),
        digest.meta.since.bright_black(),
    );
    println!();

    let Some(summary) = &digest.summary else {
        println!("{}", format!("  {}", digest.render_text()).yellow());
        println!();
        return;
    };

    println!("{}", render_summary(summary));

    if !digest.insights.contributors.is_empty() {
        println!();
        println!("{}", "👥 Contributors:".cyan());
        println!("{}", contributor_table(&digest.insights.contributors));
    }

    println!("{}", render_insights(&digest.insights));

    if digest.insights.large_commit_total > digest.insights.large_commits.len() {
        println!(
            "{}",
            format!(
                "  … {} more large commit(s) not shown",
                digest.insights.large_commit_total - digest.insights.large_commits.len()
            )
            .bright_black()
        );
    }
    println!();
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

// Cells carry color attributes instead of ANSI strings so comfy-table
// measures column widths from plain text.
fn contributor_table(contributors: &[ContributorActivity]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["RANK", "AUTHOR", "COMMITS", "ADDED", "REMOVED"]);

    for (i, c) in contributors.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("{:3}", i + 1)),
            Cell::new(truncate(&c.author, 32)),
            Cell::new(c.commits),
            Cell::new(format!("+{}", c.insertions)).fg(Color::Green),
            Cell::new(format!("-{}", c.deletions)).fg(Color::Red),
        ]);
    }
    table
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
