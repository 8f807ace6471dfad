// crates/shared-kernel/src/error.rs
use std::{fmt, path::PathBuf, time::Duration};

use thiserror::Error;

/// Classification of a failure, as recorded on a per-file outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The target path does not exist.
    PathNotFound,
    /// The extension has no language profile (single-file mode only).
    UnsupportedLanguage,
    /// Read, permission or traversal failure.
    Io,
    /// A string or comment ran into end of file. Informational only.
    MalformedInput,
    /// The atomic replace could not complete; the original file is untouched.
    WriteFailure,
    /// Per-file processing exceeded the configured time limit.
    Timeout,
    /// Invalid options (bad glob, zero workers, ...).
    InvalidConfiguration,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathNotFound => "PathNotFound",
            Self::UnsupportedLanguage => "UnsupportedLanguage",
            Self::Io => "IOError",
            Self::MalformedInput => "MalformedInput",
            Self::WriteFailure => "WriteFailure",
            Self::Timeout => "Timeout",
            Self::InvalidConfiguration => "InvalidConfiguration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum CommenterError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<CommenterError>,
    },

    #[error("path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("no files match pattern: {pattern}")]
    NoMatches { pattern: String },

    #[error("unsupported file type '{extension}': {}", path.display())]
    UnsupportedLanguage { path: PathBuf, extension: String },

    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{}': {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error under '{}': {details}", path.display())]
    Walk { path: PathBuf, details: String },

    #[error("unterminated {construct} starting at line {line} in '{}'", path.display())]
    MalformedInput { path: PathBuf, construct: String, line: usize },

    #[error("processing '{}' exceeded the time limit of {limit:?}", path.display())]
    Timeout { path: PathBuf, limit: Duration },

    #[error("Invalid pattern '{pattern}': {details}")]
    InvalidPattern { pattern: String, details: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Thread pool creation failed: {details}")]
    ThreadPoolCreation { details: String },
}

pub type Result<T> = std::result::Result<T, CommenterError>;

impl CommenterError {
    /// Maps the error onto the outcome classification used in reports.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context { source, .. } => source.kind(),
            Self::PathNotFound { .. } | Self::NoMatches { .. } => ErrorKind::PathNotFound,
            Self::UnsupportedLanguage { .. } => ErrorKind::UnsupportedLanguage,
            Self::FileRead { .. } | Self::Walk { .. } => ErrorKind::Io,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::InvalidPattern { .. } | Self::InvalidConfiguration { .. } | Self::ThreadPoolCreation { .. } => {
                ErrorKind::InvalidConfiguration
            }
        }
    }

    /// Reads from `path` failed; `NotFound` is reported as a missing path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::PathNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<CommenterError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CommenterError::Context { context: context.into(), source: Box::new(e.into()) })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| CommenterError::Context { context: f(), source: Box::new(e.into()) })
    }
}
