use crate::types::FileStat;

/// Parses the file lines of `git show --stat` for one commit.
///
/// Each `path | N +++---` line becomes a [`FileStat`] whose counts are the
/// number of `+` and `-` glyphs in the histogram column. git scales that
/// column down for wide changes, so on large diffs the counts are an
/// approximation of the real line totals, not the totals themselves.
/// Lines without a `|` (the "N files changed" footer, blanks) are skipped.
pub fn parse_stats(raw: &str) -> Vec<FileStat> {
    raw.lines().filter_map(parse_stat_line).collect()
}

fn parse_stat_line(line: &str) -> Option<FileStat> {
    let (left, right) = line.split_once('|')?;
    let path = left.trim();
    if path.is_empty() {
        return None;
    }

    let graph = histogram(right);
    Some(FileStat {
        path: path.to_string(),
        insertions: graph.chars().filter(|c| *c == '+').count(),
        deletions: graph.chars().filter(|c| *c == '-').count(),
    })
}

/// Returns the glyph column following the change count:
///   " 12 ++++++------"    → "++++++------"
///   " Bin 0 -> 12 bytes"  → ""
fn histogram(column: &str) -> &str {
    let mut parts = column.trim().splitn(2, char::is_whitespace);
    let count = parts.next().unwrap_or("");
    if count.parse::<usize>().is_err() {
        return "";
    }
    parts.next().unwrap_or("").trim()
}
