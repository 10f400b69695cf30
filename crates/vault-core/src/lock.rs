//! Advisory lock that keeps two runs off the same backup root

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use vault_fs::BackupLayout;

use crate::{Error, Result};

/// Held for the duration of a run; released on drop.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Take the lock for `layout`, creating the backup root if needed.
    ///
    /// Fails with [`Error::RunInProgress`] when another run holds it.
    pub fn acquire(layout: &BackupLayout) -> Result<Self> {
        let root = layout.root();
        fs::create_dir_all(root).map_err(|e| vault_fs::Error::io(root, e))?;

        let path = layout.lock_file();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| vault_fs::Error::io(&path, e))?;

        if file.try_lock_exclusive().is_err() {
            return Err(Error::RunInProgress {
                root: layout.display_root(),
            });
        }
        tracing::debug!(path = %path.display(), "Run lock acquired");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release run lock");
        }
    }
}
