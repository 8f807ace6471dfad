// src/presentation.rs
use commenter_domain::{BatchResult, FileOutcome, FileResult};
use commenter_engine::config::Config;
use commenter_shared_kernel::ErrorKind;
use std::io::{self, Write};
use std::time::Duration;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Writes human readable reports, optionally with ANSI colors.
pub struct Printer<W> {
    out: W,
    color: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.color { code } else { "" }
    }

    fn stat(&mut self, label: &str, value: usize) -> io::Result<()> {
        let (cyan, bold, reset) = (self.paint(CYAN), self.paint(BOLD), self.paint(RESET));
        writeln!(self.out, "{cyan}{label}:{reset} {bold}{value}{reset}")
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        let (yellow, reset) = (self.paint(YELLOW), self.paint(RESET));
        writeln!(self.out, "{yellow}Warning:{reset} {message}")
    }

    fn hint(&mut self, message: &str) -> io::Result<()> {
        let (cyan, reset) = (self.paint(CYAN), self.paint(RESET));
        writeln!(self.out, "\n{cyan}{message}{reset}")
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        let (green, reset) = (self.paint(GREEN), self.paint(RESET));
        writeln!(self.out, "{green}✓{reset} {message}")
    }

    pub fn execution_time(&mut self, elapsed: Duration) -> io::Result<()> {
        let (dim, reset) = (self.paint(DIM), self.paint(RESET));
        writeln!(self.out, "\n{dim}Execution time: {:.2}ms{reset}", elapsed.as_secs_f64() * 1000.0)
    }

    /// Report for a single target file.
    pub fn file_report(&mut self, file: &FileResult, config: &Config, elapsed: Duration) -> io::Result<()> {
        let (blue, bold, red, reset) = (self.paint(BLUE), self.paint(BOLD), self.paint(RED), self.paint(RESET));
        match &file.outcome {
            FileOutcome::Skipped(reason) => {
                writeln!(self.out, "{blue}Skipped:{reset} {} ({reason})", file.path.display())?;
                return self.execution_time(elapsed);
            }
            FileOutcome::Error { kind, message } => {
                writeln!(self.out, "{red}{bold}{kind}:{reset} {message}")?;
                return self.execution_time(elapsed);
            }
            FileOutcome::Success => {}
        }

        writeln!(self.out, "{blue}File:{reset} {} ({})", file.path.display(), file.language.unwrap_or("unknown"))?;
        if config.is_large(file.original_lines) {
            self.warning(&format!("Large file detected: {} lines (>500 LOC)", file.original_lines))?;
        }
        if let Some(note) = &file.malformed {
            self.warning(&note.describe(&file.path))?;
        }

        self.stat("Original lines", file.original_lines)?;
        self.stat("Comments removed", file.comments_removed)?;
        self.stat("Remaining lines", file.remaining_lines)?;

        if !config.write && !file.removed.is_empty() {
            let (yellow, dim) = (self.paint(YELLOW), self.paint(DIM));
            writeln!(self.out, "\n{yellow}{bold}Removed comments:{reset}")?;
            for comment in &file.removed {
                writeln!(self.out, "  {blue}Line {}:{reset} {dim}{}{reset}", comment.line, comment.text)?;
            }
        }

        if config.write {
            if file.persisted {
                self.success("File updated successfully!")?;
            } else {
                self.success("No changes needed.")?;
            }
        } else if file.comments_removed > 0 {
            self.hint("Run with --write to apply changes to the file.")?;
        }
        self.execution_time(elapsed)
    }

    /// Per-file errors and warnings followed by the batch summary block.
    pub fn batch_report(&mut self, batch: &BatchResult, config: &Config, elapsed: Duration) -> io::Result<()> {
        let (red, bold, reset) = (self.paint(RED), self.paint(BOLD), self.paint(RESET));

        for file in batch.files() {
            if file.is_success() && config.is_large(file.original_lines) {
                self.warning(&format!("Large file: {} ({} lines)", file.path.display(), file.original_lines))?;
            }
            if let Some(note) = &file.malformed {
                self.warning(&note.describe(&file.path))?;
            }
        }

        let totals = batch.totals();
        let cyan = self.paint(CYAN);
        writeln!(self.out, "\n{bold}{cyan}Batch Processing Summary:{reset}")?;
        self.stat("Files processed", totals.files_processed)?;
        self.stat("Total comments removed", totals.comments_removed)?;
        self.stat("Total lines processed", totals.lines_processed)?;

        if config.write {
            self.stat("Files written successfully", totals.files_written)?;
            let failed_writes = batch.errors().filter(|f| f.error_kind() == Some(ErrorKind::WriteFailure)).count();
            if failed_writes > 0 {
                writeln!(self.out, "{red}Failed writes: {failed_writes}{reset}")?;
            }
        }
        if totals.failures > 0 {
            writeln!(self.out, "{red}Failed: {}{reset}", totals.failures)?;
            writeln!(self.out, "\n{red}{bold}Errors:{reset}")?;
            for file in batch.errors() {
                if let FileOutcome::Error { message, .. } = &file.outcome {
                    writeln!(self.out, "  {red}{message}{reset}")?;
                }
            }
        }

        if !config.write && totals.comments_removed > 0 {
            self.hint("Run with --write to apply changes to all files.")?;
        }
        self.execution_time(elapsed)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        let (red, bold, reset) = (self.paint(RED), self.paint(BOLD), self.paint(RESET));
        writeln!(self.out, "{red}{bold}Error:{reset} {message}")
    }
}
