//! Scoped temporary buffer for one transfer.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// A uniquely named temporary file owned by a single transfer.
///
/// The file is removed by [`ScopedTempFile::release`] or, failing that, when
/// the value is dropped. Releasing more than once is a no-op.
#[derive(Debug)]
pub struct ScopedTempFile {
    path: PathBuf,
    guard: Option<TempPath>,
}

impl ScopedTempFile {
    /// Create an empty file in `dir`.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        let guard = tempfile::Builder::new()
            .prefix("tgdrive-")
            .suffix(".part")
            .tempfile_in(dir)?
            .into_temp_path();

        Ok(Self {
            path: guard.to_path_buf(),
            guard: Some(guard),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn is_released(&self) -> bool {
        self.guard.is_none()
    }

    /// Remove the file. A file that is already gone is not an error.
    pub fn release(&mut self) -> io::Result<()> {
        let Some(guard) = self.guard.take() else {
            return Ok(());
        };

        match guard.close() {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cleaned up temporary file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for ScopedTempFile {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove temporary file"
            );
        }
    }
}
