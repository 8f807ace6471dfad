// crates/infra/src/filesystem.rs
use std::path::{Path, PathBuf};

use commenter_shared_kernel::{CommenterError, Result};
use globset::{Glob, GlobMatcher};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::warn;

/// Per-directory ignore file honoured in addition to `.gitignore`.
pub const CUSTOM_IGNORE_FILENAME: &str = ".commenterignore";

/// Exclude globs supplied by the user.
///
/// A pattern containing `/` or `**` is matched against the path (both as
/// given and relative to the walk root); any other pattern is matched against
/// the file name only.
#[derive(Debug, Default)]
pub struct ExcludeMatcher {
    name_patterns: Vec<GlobMatcher>,
    path_patterns: Vec<GlobMatcher>,
}

impl ExcludeMatcher {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut matcher = Self::default();
        for raw in patterns {
            #[cfg(windows)]
            let pattern = raw.replace('\\', "/");
            #[cfg(not(windows))]
            let pattern = raw.clone();

            if pattern.trim().is_empty() {
                continue;
            }
            let glob = Glob::new(&pattern)
                .map_err(|err| CommenterError::InvalidPattern { pattern: raw.clone(), details: err.to_string() })?
                .compile_matcher();
            if looks_like_path(&pattern) {
                matcher.path_patterns.push(glob);
            } else {
                matcher.name_patterns.push(glob);
            }
        }
        Ok(matcher)
    }

    pub fn is_empty(&self) -> bool {
        self.name_patterns.is_empty() && self.path_patterns.is_empty()
    }

    /// Whether `path` (found under `root`) is excluded.
    pub fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        if let Some(name) = path.file_name()
            && self.name_patterns.iter().any(|m| m.is_match(name))
        {
            return true;
        }
        if self.path_patterns.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.path_patterns.iter().any(|m| m.is_match(path) || m.is_match(relative))
    }
}

fn looks_like_path(pattern: &str) -> bool {
    pattern.contains('/') || pattern.contains("**")
}

/// Ignore rules from the `.gitignore` / `.commenterignore` files that sit
/// next to a single target file.
pub struct SiblingIgnore {
    rules: Gitignore,
}

impl SiblingIgnore {
    /// `.commenterignore` is always read; `.gitignore` only when `git_ignore`.
    pub fn for_file(path: &Path, git_ignore: bool) -> Self {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        let mut builder = GitignoreBuilder::new(dir);
        let names: &[&str] = if git_ignore { &[".gitignore", CUSTOM_IGNORE_FILENAME] } else { &[CUSTOM_IGNORE_FILENAME] };
        for name in names {
            let file: PathBuf = dir.join(name);
            if file.is_file()
                && let Some(err) = builder.add(&file)
            {
                warn!("ignoring malformed rules in {}: {err}", file.display());
            }
        }
        let rules = builder.build().unwrap_or_else(|err| {
            warn!("failed to compile ignore rules under {}: {err}", dir.display());
            Gitignore::empty()
        });
        Self { rules }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        self.rules.matched(path, false).is_ignore()
    }
}
