use crate::error::{PulseError, Result};
use crate::git::command::GitRunner;
use crate::git::log_parser::{parse_log, LOG_FORMAT};
use crate::git::stat_parser::parse_stats;
use crate::types::CommitRecord;
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

// Keeps the cutoff arithmetic inside chrono's date range (~1000 years).
const MAX_WINDOW_DAYS: i64 = 365 * 1000;

/// Knobs for a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Worker threads used for the per-commit `git show --stat` calls.
    /// `1` runs them one after another on the calling thread.
    pub jobs: usize,
    /// Deadline applied to every git invocation.
    pub timeout: Option<Duration>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            timeout: None,
        }
    }
}

/// Collects the commits of one repository inside a trailing day window.
#[derive(Debug, Clone)]
pub struct Analyzer {
    location: PathBuf,
    runner: GitRunner,
    jobs: usize,
}

impl Analyzer {
    pub fn new<P: AsRef<Path>>(p: P) -> Self {
        Self::with_options(p, &AnalyzerOptions::default())
    }

    pub fn with_options<P: AsRef<Path>>(p: P, options: &AnalyzerOptions) -> Self {
        Analyzer {
            location: p.as_ref().to_path_buf(),
            runner: GitRunner::new().with_timeout(options.timeout),
            jobs: options.jobs.max(1),
        }
    }

    /// Swaps the command runner, keeping location and job count.
    pub fn with_runner(mut self, runner: GitRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Asks git for the newest commit hash to confirm the repository is
    /// usable. Any failure is reported as [`PulseError::RepositoryAccess`].
    pub fn probe(&self) -> Result<String> {
        if !self.location.is_dir() {
            let reason = if self.location.exists() {
                "not a directory"
            } else {
                "path does not exist"
            };
            return Err(self.access_error(reason));
        }

        let head = self
            .runner
            .run(&self.location, &["log", "-1", "--pretty=format:%H"])
            .map_err(|e| self.access_error(e.to_string()))?;
        let head = head.trim().to_string();
        if head.is_empty() {
            return Err(self.access_error("repository has no commits"));
        }

        info!(repo = %self.location.display(), %head, "repository is accessible");
        Ok(head)
    }

    /// Reads the log since [`since_date`]`(days)` into commit records whose
    /// file statistics are still empty, in git's newest-first order.
    pub fn load_log(&self, days: i64) -> Result<Vec<CommitRecord>> {
        self.load_log_since(&since_date(days))
    }

    /// Same as [`Analyzer::load_log`] with an already computed cutoff, so a
    /// caller that reports the cutoff shows the one git was given.
    pub fn load_log_since(&self, since: &str) -> Result<Vec<CommitRecord>> {
        let args = ["log".to_string(), format!("--since={since}"), LOG_FORMAT.to_string()];
        let raw = self.runner.run(&self.location, &args)?;
        parse_log(&raw)
    }

    /// Runs `git show --stat` for every commit and merges the result into it.
    ///
    /// With more than one job the calls are spread over a private thread
    /// pool; each worker writes only to its own record, so the slice keeps
    /// its order and the outcome matches the sequential loop.
    pub fn attach_stats(&self, commits: &mut [CommitRecord]) -> Result<()> {
        if self.jobs > 1 && commits.len() > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => {
                    return pool.install(|| {
                        commits
                            .par_iter_mut()
                            .try_for_each(|commit| self.attach_one(commit))
                    });
                }
                Err(e) => warn!("cannot start stat workers, falling back to one: {e}"),
            }
        }

        for commit in commits.iter_mut() {
            self.attach_one(commit)?;
        }
        Ok(())
    }

    fn attach_one(&self, commit: &mut CommitRecord) -> Result<()> {
        let raw = self
            .runner
            .run(&self.location, &["show", "--stat", "--format=", commit.hash.as_str()])?;
        commit.merge_stats(&parse_stats(&raw));
        Ok(())
    }

    /// Probe, read the windowed log, then attach per-commit stats.
    /// Records come back in log order; nothing is returned on failure.
    pub fn analyze(&self, days: i64) -> Result<Vec<CommitRecord>> {
        self.analyze_since(&since_date(days))
    }

    pub fn analyze_since(&self, since: &str) -> Result<Vec<CommitRecord>> {
        self.probe()?;
        let mut commits = self.load_log_since(since)?;
        self.attach_stats(&mut commits)?;
        info!(
            repo = %self.location.display(),
            since,
            commits = commits.len(),
            "analysis complete"
        );
        Ok(commits)
    }

    fn access_error(&self, reason: impl Into<String>) -> PulseError {
        PulseError::RepositoryAccess {
            path: self.location.clone(),
            reason: reason.into(),
        }
    }
}

/// Analyzes `repo_path` over the last `days` days with default options.
pub fn analyze<P: AsRef<Path>>(repo_path: P, days: i64) -> Result<Vec<CommitRecord>> {
    Analyzer::new(repo_path).analyze(days)
}

/// The `--since` cutoff: today's local date minus `days`, as `YYYY-MM-DD`.
///
/// Zero or negative windows are not rejected; they put the cutoff at or
/// after today.
pub fn since_date(days: i64) -> String {
    since_date_from(Local::now().date_naive(), days)
}

pub fn since_date_from(today: NaiveDate, days: i64) -> String {
    let days = days.clamp(-MAX_WINDOW_DAYS, MAX_WINDOW_DAYS);
    (today - chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}
