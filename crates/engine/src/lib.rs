// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::path::Path;

pub mod config;
pub mod filesystem;
pub mod processor;

use crate::config::Config;
use crate::filesystem::WalkItem;
use commenter_domain::{BatchResult, FileResult};
use commenter_infra::filesystem::{ExcludeMatcher, SiblingIgnore};
use commenter_shared_kernel::{CommenterError, ErrorContext, Result};
use log::{debug, info};

pub use crate::processor::{process_file, scan_file};

/// Run the engine over every configured root.
///
/// # Errors
///
/// Returns an error for terminal failures only: invalid configuration, a
/// missing root, or a walk that cannot start. Per-file failures are recorded
/// as `Error` outcomes inside the returned `BatchResult`.
pub fn run(config: &Config) -> Result<BatchResult> {
    config.validate()?;

    let mut files = Vec::new();
    for root in config.roots() {
        let batch = process_batch(&root, config.walk.recursive, config.write, config)?;
        files.extend(batch.into_files());
    }
    Ok(BatchResult::from_results(files))
}

/// Process `root`, which may be a single file, a directory or a glob pattern.
///
/// A single file with an unsupported extension yields one `Error` result,
/// while unsupported files met during a directory walk or glob expansion are
/// skipped.
///
/// # Errors
///
/// `PathNotFound` when `root` does not exist or a glob matches nothing;
/// `InvalidConfiguration` for bad patterns or a pool that cannot be built.
pub fn process_batch(root: &Path, recursive: bool, write: bool, config: &Config) -> Result<BatchResult> {
    if filesystem::is_glob(root) {
        return process_glob(root, write, config);
    }

    let metadata = std::fs::metadata(root).map_err(|e| CommenterError::read(root, e))?;

    if metadata.is_file() {
        return Ok(BatchResult::from_results(vec![process_single(root, write, config)?]));
    }

    let pool = build_pool(config)?;

    let (tx, rx) = crossbeam_channel::bounded(1024);
    let (err_tx, err_rx) = std::sync::mpsc::channel();

    let mut walk_cfg = config.walk.clone();
    walk_cfg.recursive = recursive;
    let walk_root = root.to_path_buf();

    std::thread::spawn(move || {
        if let Err(e) = crate::filesystem::walk_parallel(&walk_root, &walk_cfg, &tx) {
            let _ = err_tx.send(e);
        }
    });

    let results: Vec<FileResult> = pool.install(|| {
        rx.into_iter()
            .par_bridge()
            .map(|item| match item {
                WalkItem::File(path) => processor::process_file(&path, write, config),
                WalkItem::Failed { path, details } => {
                    let err = CommenterError::Walk { path: path.clone(), details };
                    FileResult::failure(path, None, &err)
                }
            })
            .collect()
    });

    // The walk thread has finished once the channel is drained.
    if let Ok(walk_err) = err_rx.try_recv() {
        return Err(walk_err).with_context(|| format!("walking {}", root.display()));
    }

    let batch = BatchResult::from_results(results);
    info!(
        "{}: {} files, {} comments removed, {} failed",
        root.display(),
        batch.totals().files_processed,
        batch.totals().comments_removed,
        batch.totals().failures
    );
    Ok(batch)
}

fn build_pool(config: &Config) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .map_err(|e| CommenterError::ThreadPoolCreation { details: e.to_string() })
}

/// Every file named by a glob is treated like a single target.
fn process_glob(pattern: &Path, write: bool, config: &Config) -> Result<BatchResult> {
    let paths = filesystem::expand_glob(pattern, &config.walk)?;
    let pool = build_pool(config)?;
    let results = pool.install(|| paths.par_iter().map(|path| process_single(path, write, config)).collect::<Result<Vec<_>>>())?;

    let batch = BatchResult::from_results(results);
    info!("{}: {} files matched, {} comments removed", pattern.display(), batch.files().len(), batch.totals().comments_removed);
    Ok(batch)
}

/// A single target file honours exclude patterns and its sibling ignore files.
fn process_single(path: &Path, write: bool, config: &Config) -> Result<FileResult> {
    let matcher = ExcludeMatcher::new(&config.walk.exclude_patterns)?;
    let parent = path.parent().unwrap_or(path);
    if matcher.is_excluded(path, parent) {
        debug!("{} matches an exclude pattern", path.display());
        return Ok(FileResult::skipped(path.to_path_buf(), "excluded by pattern"));
    }
    if SiblingIgnore::for_file(path, config.walk.git_ignore).is_ignored(path) {
        debug!("{} is ignored", path.display());
        return Ok(FileResult::skipped(path.to_path_buf(), "ignored by ignore file"));
    }
    Ok(processor::process_file(path, write, config))
}
