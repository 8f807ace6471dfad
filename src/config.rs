// src/config.rs
use crate::args::Args;
use anyhow::{Context, Result};
use commenter_engine::config::{Config, ConfigBuilder, DEFAULT_LARGE_FILE_THRESHOLD, WalkOptionsBuilder};
use commenter_infra::Layout;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "commenter.config.json";

/// Options read from `commenter.config.json`.
///
/// Every key is optional; absent keys fall back to the command line defaults.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub write: Option<bool>,
    pub no_color: Option<bool>,
    pub recursive: Option<bool>,
    pub no_warn_large: Option<bool>,
    pub exclude_patterns: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub compact: Option<bool>,
    pub jobs: Option<usize>,
}

impl FileConfig {
    /// Load the file named by `--config`, or the default file when present.
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::load(path).map(Some),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() { Self::load(path).map(Some) } else { Ok(None) }
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Settings the binary needs beyond the engine configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub target: PathBuf,
    pub color: bool,
    pub engine: Config,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let file = FileConfig::discover(args.config.as_deref())?;
        Self::merge(args, file.unwrap_or_default())
    }

    /// Command line flags win; list options from the file apply only when the
    /// corresponding flag list is empty.
    pub fn merge(args: Args, file: FileConfig) -> Result<Self> {
        let exclude = pick_list(Args::trimmed(&args.exclude), file.exclude_patterns);
        let ignore = pick_list(Args::trimmed(&args.ignore_pattern), file.ignore_patterns);
        let recursive = args.recursion().or(file.recursive).unwrap_or(true);
        let jobs = match args.jobs {
            Some(n) => usize::try_from(n).context("--jobs is out of range")?,
            None => file.jobs.unwrap_or_else(num_cpus::get),
        };
        let layout = if args.compact || file.compact.unwrap_or(false) { Layout::Compact } else { Layout::Preserve };
        let warn_large = !(args.no_warn_large || file.no_warn_large.unwrap_or(false));

        let walk = WalkOptionsBuilder::default()
            .roots(vec![args.path.clone()])
            .recursive(recursive)
            .threads(jobs.clamp(1, 12))
            .hidden(!args.no_hidden)
            .git_ignore(!args.no_gitignore)
            .exclude_patterns(exclude)
            .build()
            .context("building walk options")?;

        let engine = ConfigBuilder::default()
            .walk(walk)
            .jobs(jobs)
            .write(args.write || file.write.unwrap_or(false))
            .layout(layout)
            .ignore_patterns(ignore)
            .timeout(args.timeout.map(Duration::from_secs))
            .large_file_threshold(warn_large.then_some(DEFAULT_LARGE_FILE_THRESHOLD))
            .build()
            .context("building engine configuration")?;

        Ok(Self {
            target: args.path,
            color: !(args.no_color || file.no_color.unwrap_or(false)),
            engine,
        })
    }
}

fn pick_list(cli: Vec<String>, file: Vec<String>) -> Vec<String> {
    if cli.is_empty() { file.into_iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect() } else { cli }
}
