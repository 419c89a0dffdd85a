use clap::Parser;
use git_pulse::config::{self, PulseConfig};
use git_pulse::reporters;
use git_pulse::{since_date, Analyzer, AnalyzerOptions, Digest, PulseError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const DEFAULT_DAYS: i64 = 7;
const DEFAULT_FORMAT: &str = "terminal";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Parser, Debug)]
#[command(
    name = "git-pulse",
    about = "📊 Summarize recent git activity into a daily breakdown and insights",
    version,
    long_about = "Reads the commit log of a local git repository for the last N days,\n\
                  attaches per-commit file statistics and prints a day-by-day report\n\
                  followed by contributor and file-type insights.\n\n\
                  Settings can also come from .git-pulse.yml in the repository root\n\
                  (see --generate-config). Flags always win over the config file."
)]
struct Args {
    /// Path to the git repository. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    repo_path: Option<PathBuf>,

    /// Number of trailing days to analyze [default: 7]
    #[arg(long, short)]
    days: Option<i64>,

    /// Output format: terminal, text, json [default: terminal]
    #[arg(long)]
    format: Option<String>,

    /// Output file for --format json (or for --generate-config).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Parallel `git show --stat` workers [default: number of CPUs]
    #[arg(long)]
    jobs: Option<usize>,

    /// Seconds before a single git invocation is abandoned [default: 60]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Config file to use instead of .git-pulse.yml lookup.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print an annotated config template and exit.
    #[arg(long)]
    generate_config: bool,
}

/// Flags merged over the config file, with defaults filled in.
#[derive(Debug)]
struct Settings {
    days: i64,
    format: String,
    output: Option<PathBuf>,
    options: AnalyzerOptions,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let result = if args.generate_config {
        config::print_template(args.output.as_deref())
    } else {
        run(&args)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), PulseError> {
    let repo_path = match &args.repo_path {
        Some(p) => p.clone(),
        None => std::env::current_dir()?,
    };

    let cfg = match config::find_config(args.config.as_deref(), &repo_path) {
        Some(path) => config::load_config(&path)?,
        None => PulseConfig::default(),
    };
    let settings = resolve_settings(args, &cfg)?;

    let digest = run_analysis(&repo_path, &settings)?;

    match settings.format.as_str() {
        "json" => reporters::json::report_json(&digest, settings.output.as_deref())?,
        "text" => println!("{}", digest.render_text()),
        _ => reporters::terminal::report_terminal(&digest),
    }
    Ok(())
}

fn resolve_settings(args: &Args, cfg: &PulseConfig) -> Result<Settings, PulseError> {
    let merged = PulseConfig {
        days: args.days.or(cfg.days),
        format: args.format.clone().or_else(|| cfg.format.clone()),
        output: args
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .or_else(|| cfg.output.clone()),
        jobs: args.jobs.or(cfg.jobs),
        timeout_secs: args.timeout.or(cfg.timeout_secs),
    };
    merged.validate().map_err(PulseError::Config)?;

    let defaults = AnalyzerOptions::default();
    Ok(Settings {
        days: merged.days.unwrap_or(DEFAULT_DAYS),
        format: merged.format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
        output: merged.output.map(PathBuf::from),
        options: AnalyzerOptions {
            jobs: merged.jobs.unwrap_or(defaults.jobs),
            timeout: Some(Duration::from_secs(
                merged.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            )),
        },
    })
}

// ── Analysis pipeline ──────────────────────────────────────────────────────────

fn run_analysis(repo_path: &Path, settings: &Settings) -> Result<Digest, PulseError> {
    let pb = if settings.format == "terminal" {
        spinner()
    } else {
        ProgressBar::hidden()
    };

    let analyzer = Analyzer::with_options(repo_path, &settings.options);
    let total_start = Instant::now();
    let mut step_start = Instant::now();

    pb.set_message("[1/3] Checking repository access...");
    let head = analyzer.probe().map_err(|e| abort(&pb, e))?;
    let t1 = fmt_dur(step_start.elapsed());
    step_start = Instant::now();
    pb.println(format!("  ✓ [1/3] Repository accessible ({})      {t1}", short_hash(&head)));

    let since = since_date(settings.days);
    pb.set_message(format!("[2/3] Reading log since {since}..."));
    let mut commits = analyzer.load_log_since(&since).map_err(|e| abort(&pb, e))?;
    let t2 = fmt_dur(step_start.elapsed());
    step_start = Instant::now();
    pb.println(format!("  ✓ [2/3] Reading commit log ({} commits)    {t2}", commits.len()));

    pb.set_message(format!(
        "[3/3] Collecting diff stats ({} workers)...",
        settings.options.jobs
    ));
    analyzer
        .attach_stats(&mut commits)
        .map_err(|e| abort(&pb, e))?;
    let t3 = fmt_dur(step_start.elapsed());
    pb.println(format!("  ✓ [3/3] Collecting diff stats               {t3}"));

    pb.finish_and_clear();
    if settings.format == "terminal" {
        eprintln!(
            "✔ {} commits in {} days — ⏱ {}",
            commits.len(),
            settings.days,
            fmt_dur(total_start.elapsed())
        );
    }

    Ok(Digest::from_window(repo_path, settings.days, since, commits))
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn abort(pb: &ProgressBar, e: PulseError) -> PulseError {
    pb.finish_and_clear();
    e
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

// ── Duration formatting ────────────────────────────────────────────────────────

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_millis();
    if ms >= 1000 { format!("{:.1}s", d.as_secs_f64()) } else { format!("{ms}ms") }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
