use crate::config::Config;
use commenter_domain::{FileResult, LanguageProfile, LineStats, profile_for_path};
use commenter_infra::persistence::{FileReader, FileWriter};
use commenter_infra::Stripper;
use commenter_shared_kernel::{CommenterError, Result};
use log::{debug, warn};
use std::path::Path;

/// Strip a single file without touching it on disk.
pub fn scan_file(path: &Path, config: &Config) -> FileResult {
    process_file(path, false, config)
}

/// Strip a single file, persisting the result when `write` is set.
///
/// Every failure is folded into the returned `FileResult`.
pub fn process_file(path: &Path, write: bool, config: &Config) -> FileResult {
    let Some(profile) = profile_for_path(path) else {
        let extension = path.extension().map(|e| e.to_string_lossy().into_owned()).unwrap_or_default();
        let err = CommenterError::UnsupportedLanguage { path: path.to_path_buf(), extension };
        return FileResult::failure(path.to_path_buf(), None, &err);
    };

    match strip_file(path, profile, write, config) {
        Ok(result) => result,
        Err(err) => {
            warn!("{err}");
            FileResult::failure(path.to_path_buf(), Some(profile.name), &err)
        }
    }
}

fn strip_file(path: &Path, profile: &'static LanguageProfile, write: bool, config: &Config) -> Result<FileResult> {
    let input = FileReader::read_to_end(path)?;
    let outcome = Stripper::new(profile, config.layout)
        .with_ignore_patterns(&config.ignore_patterns)
        .with_timeout(config.timeout)
        .strip_bytes(path, &input)?;

    if let Some(note) = &outcome.malformed {
        warn!("{}", note.describe(path));
    }

    let stats = LineStats::from_io(&input, &outcome.output);
    let persisted = apply(path, &input, &outcome.output, write)?;
    debug!(
        "{}: {} comments removed, {} -> {} lines{}",
        path.display(),
        outcome.comments_removed,
        stats.original,
        stats.remaining,
        if persisted { " (written)" } else { "" }
    );

    Ok(FileResult::success(path.to_path_buf(), profile.name, stats, outcome.comments_removed, outcome.removed)
        .with_malformed(outcome.malformed)
        .with_persisted(persisted))
}

/// Persist `output` over `path` when writing and the content changed.
///
/// Returns whether the file was rewritten.
pub fn apply(path: &Path, input: &[u8], output: &[u8], write: bool) -> Result<bool> {
    if !write || input == output {
        return Ok(false);
    }
    FileWriter::atomic_write(path, output)?;
    Ok(true)
}
