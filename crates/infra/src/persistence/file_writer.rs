// crates/infra/src/persistence/file_writer.rs
use std::{
    fs::{self, File},
    io::Write,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use commenter_shared_kernel::{CommenterError, Result};

/// Helper utilities for writing files.
pub struct FileWriter;

impl FileWriter {
    /// Atomically replace `path` with `data` via a temp file in the same
    /// directory and a rename. The original file's permissions are kept.
    ///
    /// A symlink is resolved first so the link target is rewritten and the
    /// link itself survives. On failure the original is untouched and the temp
    /// file is removed.
    pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
        Self::try_atomic_write(path, data).map_err(|source| CommenterError::WriteFailure { path: path.to_path_buf(), source })
    }

    fn try_atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let target = resolve(path)?;
        let path = target.as_path();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(path).ok().map(|m| m.permissions());

        // Dropping the temp file before `persist` deletes it.
        let mut tmp = tempfile::Builder::new().prefix(".commenter-").suffix(".tmp").tempfile_in(parent)?;
        tmp.write_all(data)?;
        tmp.flush()?;
        let _ = tmp.as_file().sync_all();
        if let Some(permissions) = permissions {
            fs::set_permissions(tmp.path(), permissions)?;
        }

        tmp.persist(path).map_err(|e| e.error)?;

        // Attempt to sync parent directory to make the rename durable on Unix.
        #[cfg(unix)]
        {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}
