// crates/infra/src/persistence/file_reader.rs
use std::{fs, path::Path};

use commenter_shared_kernel::{CommenterError, Result};

/// Convenience helpers for reading files with consistent error handling.
pub struct FileReader;

impl FileReader {
    /// Read the entire file into memory.
    pub fn read_to_end(path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| CommenterError::read(path, e))
    }
}
