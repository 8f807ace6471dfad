// src/lib.rs
// 依存関係の推移的依存により複数のバージョンが混在するための抑制
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod config;
pub mod presentation;

use crate::config::AppConfig;
use crate::presentation::Printer;
use anyhow::{Context, Result, bail};
use commenter_domain::FileOutcome;
use std::io::Write;
use std::time::Instant;

/// Run the engine for `app` and print the report through `printer`.
///
/// A file target gets the single-file report, a directory or glob the batch
/// summary. Returns `true` when every targeted file succeeded.
///
/// # Errors
///
/// Terminal failures (missing target, nothing to process, invalid
/// configuration, unwritable output) are returned; per-file failures only
/// affect the return value.
pub fn execute<W: Write>(app: &AppConfig, printer: &mut Printer<W>) -> Result<bool> {
    let started = Instant::now();
    let single = app.target.is_file();

    let batch = commenter_engine::run(&app.engine).with_context(|| format!("processing {}", app.target.display()))?;
    let elapsed = started.elapsed();

    if batch.files().iter().all(|f| matches!(f.outcome, FileOutcome::Skipped(_))) {
        bail!("No supported files found in '{}'", app.target.display());
    }

    let report = match batch.files() {
        [file] if single => printer.file_report(file, &app.engine, elapsed),
        _ => printer.batch_report(&batch, &app.engine, elapsed),
    };
    report.context("writing report")?;

    Ok(!batch.failed())
}
