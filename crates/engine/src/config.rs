use commenter_infra::Layout;
use commenter_shared_kernel::{CommenterError, Result};
use derive_builder::Builder;
use std::path::PathBuf;
use std::time::Duration;

/// Files longer than this are flagged in reports.
pub const DEFAULT_LARGE_FILE_THRESHOLD: usize = 500;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    #[builder(default = "true")]
    pub recursive: bool,
    #[builder(default = "1")]
    pub threads: usize,
    /// Dot files and directories are walked unless this is cleared.
    #[builder(default = "true")]
    pub hidden: bool,
    #[builder(default = "true")]
    pub git_ignore: bool,
    #[builder(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            recursive: true,
            threads: 1,
            hidden: true,
            git_ignore: true,
            exclude_patterns: vec![],
        }
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,

    /// Worker pool size.
    #[builder(default = "num_cpus::get()")]
    pub jobs: usize,
    #[builder(default)]
    pub write: bool,
    /// `Preserve` unless compaction is requested.
    #[builder(default)]
    pub layout: Layout,
    /// Comments containing any of these are kept.
    #[builder(default)]
    pub ignore_patterns: Vec<String>,
    /// Per-file processing limit.
    #[builder(default)]
    pub timeout: Option<Duration>,
    /// `None` disables the large-file warning.
    #[builder(default = "Some(DEFAULT_LARGE_FILE_THRESHOLD)")]
    pub large_file_threshold: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            jobs: num_cpus::get(),
            write: false,
            layout: Layout::default(),
            ignore_patterns: vec![],
            timeout: None,
            large_file_threshold: Some(DEFAULT_LARGE_FILE_THRESHOLD),
        }
    }
}

impl Config {
    /// Reject option combinations that can never run.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(CommenterError::InvalidConfiguration { reason: "jobs must be at least 1".into() });
        }
        if self.walk.threads == 0 {
            return Err(CommenterError::InvalidConfiguration { reason: "walk threads must be at least 1".into() });
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(CommenterError::InvalidConfiguration { reason: "timeout must be greater than zero".into() });
        }
        Ok(())
    }

    /// Roots to process; the current directory when none were given.
    pub fn roots(&self) -> Vec<PathBuf> {
        if self.walk.roots.is_empty() { vec![PathBuf::from(".")] } else { self.walk.roots.clone() }
    }

    pub fn is_large(&self, lines: usize) -> bool {
        self.large_file_threshold.is_some_and(|limit| lines > limit)
    }
}
