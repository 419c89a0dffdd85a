use crate::error::{PulseError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the repository root when `--config` is not given.
pub const REPO_CONFIG_FILE: &str = ".git-pulse.yml";

/// All settings that can be placed in a .git-pulse.yml config file.
/// Every field is optional; omitted fields fall back to CLI defaults.
/// CLI flags always take precedence over values set here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseConfig {
    pub days: Option<i64>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub jobs: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl PulseConfig {
    /// Validates semantic constraints that serde cannot enforce.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(fmt) = &self.format {
            match fmt.as_str() {
                "terminal" | "text" | "json" => {}
                other => {
                    return Err(format!(
                        "Invalid 'format' value: \"{other}\". \
                         Expected one of: \"terminal\", \"text\", \"json\""
                    ))
                }
            }
        }

        if let Some(days) = self.days {
            if days < 1 {
                return Err(format!(
                    "Invalid 'days' value: {days}. Must be 1 or greater"
                ));
            }
        }

        if let Some(0) = self.jobs {
            return Err("Invalid 'jobs' value: 0. Must be 1 or greater".to_string());
        }

        if let Some(0) = self.timeout_secs {
            return Err("Invalid 'timeout_secs' value: 0. \
                 Must be 1 or greater (omit it to use the default)"
                .to_string());
        }

        Ok(())
    }
}

/// Reads, parses, and validates a YAML config file from `path`.
pub fn load_config(path: &Path) -> Result<PulseConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PulseError::Config(format!("Cannot read config file '{}': {e}", path.display()))
    })?;
    let cfg: PulseConfig = serde_yaml::from_str(&content).map_err(|e| {
        PulseError::Config(format!("Invalid config file '{}': {e}", path.display()))
    })?;
    cfg.validate()
        .map_err(|e| PulseError::Config(format!("Config file '{}': {e}", path.display())))?;
    Ok(cfg)
}

/// Picks the config file to use: an explicit path wins, then
/// `<repo>/.git-pulse.yml`, then `<config dir>/git-pulse/config.yml`.
pub fn find_config(explicit: Option<&Path>, repo_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let candidates = [
        Some(repo_path.join(REPO_CONFIG_FILE)),
        dirs::config_dir().map(|d| d.join("git-pulse").join("config.yml")),
    ];
    let found = candidates.into_iter().flatten().find(|p| p.is_file());
    if let Some(p) = &found {
        debug!(path = %p.display(), "using config file");
    }
    found
}

/// Annotated YAML template printed by `--generate-config`.
pub static TEMPLATE: &str = r#"# git-pulse configuration file
# Generated by: git-pulse --generate-config
#
# All settings are optional. Omit any field to use the built-in default.
# CLI flags always take precedence over values in this file.
# Save this file as .git-pulse.yml in your repository root, or as
# git-pulse/config.yml in your user config directory.

# ── Analysis window ────────────────────────────────────────────────────────────

# Number of trailing days to analyze.
# days: 7

# ── Output ─────────────────────────────────────────────────────────────────────

# Output format: terminal, text, json
# format: "terminal"

# Output file for --format json. Defaults to stdout.
# output: "pulse.json"

# ── Execution ──────────────────────────────────────────────────────────────────

# Parallel `git show --stat` workers. Defaults to the number of CPUs.
# jobs: 4

# Seconds before a single git invocation is abandoned.
# timeout_secs: 60
"#;

/// Prints the config template to stdout, or writes it to `output_path` if given.
pub fn print_template(output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => std::fs::write(path, TEMPLATE).map_err(|e| {
            PulseError::Config(format!(
                "Cannot write config template to '{}': {e}",
                path.display()
            ))
        }),
        None => {
            print!("{TEMPLATE}");
            Ok(())
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
