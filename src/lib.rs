//! Summarize recent git activity for a repository.
//!
//! The pipeline shells out to the `git` executable (it must be on `PATH`):
//! the commit log for a trailing window of days is parsed into
//! [`CommitRecord`]s, each record gets its `git show --stat` file changes, and
//! the records are turned into a day-by-day report plus contributor and
//! file-type insights.
//!
//! ```no_run
//! use git_pulse::{analyze, generate_insights, generate_report, render_insights};
//!
//! # fn main() -> git_pulse::Result<()> {
//! let commits = analyze("path/to/repo", 7)?;
//! println!("{}", generate_report(&commits));
//! println!("{}", render_insights(&generate_insights(&commits)));
//! # Ok(())
//! # }
//! ```

pub mod analyzers;
pub mod config;
pub mod digest;
pub mod error;
pub mod git;
pub mod reporters;
pub mod types;

pub use crate::analyzers::insights::generate_insights;
pub use crate::analyzers::summary::summarize;
pub use crate::digest::digest;
pub use crate::error::{PulseError, Result};
pub use crate::git::command::GitRunner;
pub use crate::git::log_parser::parse_log;
pub use crate::git::repository::{analyze, since_date, Analyzer, AnalyzerOptions};
pub use crate::git::stat_parser::parse_stats;
pub use crate::reporters::text::{generate_report, render_insights};
pub use crate::types::{CommitRecord, Digest, FileStat, Insights, ReportSummary};
