//! On-disk layout of a backup root
//!
//! ```text
//! <root>/
//!   .appvault.lock
//!   Google Chrome/
//!     Default/               captured folder, by base name
//!     Google Chrome_reg.reg  registry export
//!   Google Chrome_backup.zip
//! ```

use std::path::{Path, PathBuf};

use crate::constants::{
    ARCHIVE_EXTENSION, ARCHIVE_SUFFIX, REGISTRY_EXTENSION, REGISTRY_SUFFIX, VaultPath,
};

/// Path calculations for one backup root. Performs no I/O except in
/// [`BackupLayout::registry_files`] and [`BackupLayout::display_root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupLayout {
    root: PathBuf,
}

impl BackupLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root as shown to users: canonical when it exists, without `\\?\` prefixes.
    pub fn display_root(&self) -> PathBuf {
        dunce::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone())
    }

    /// Output location of one application.
    pub fn app_dir(&self, app: &str) -> PathBuf {
        self.root.join(app)
    }

    /// Where a resource with the given base name is captured for `app`.
    pub fn captured_path(&self, app: &str, base_name: &str) -> PathBuf {
        self.app_dir(app).join(base_name)
    }

    /// Registry export file for the `index`-th captured key of `app`.
    ///
    /// The first key uses `<app>_reg.reg`; further keys are numbered from 2.
    pub fn registry_file(&self, app: &str, index: usize) -> PathBuf {
        let name = if index == 0 {
            format!("{app}{REGISTRY_SUFFIX}.{REGISTRY_EXTENSION}")
        } else {
            format!("{app}{REGISTRY_SUFFIX}_{}.{REGISTRY_EXTENSION}", index + 1)
        };
        self.app_dir(app).join(name)
    }

    /// Existing registry export files of `app`, in export order.
    pub fn registry_files(&self, app: &str) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let primary = self.registry_file(app, 0);
        if !primary.is_file() {
            return files;
        }
        files.push(primary);
        let mut index = 1;
        loop {
            let next = self.registry_file(app, index);
            if !next.is_file() {
                break;
            }
            files.push(next);
            index += 1;
        }
        files
    }

    /// Archive path without extension, as handed to the archiver.
    pub fn archive_base(&self, app: &str) -> PathBuf {
        self.root.join(format!("{app}{ARCHIVE_SUFFIX}"))
    }

    /// Final archive path of `app`.
    pub fn archive_path(&self, app: &str) -> PathBuf {
        self.root
            .join(format!("{app}{ARCHIVE_SUFFIX}.{ARCHIVE_EXTENSION}"))
    }

    /// Advisory lock file guarding runs against this root.
    pub fn lock_file(&self) -> PathBuf {
        self.root.join(VaultPath::LockFile.as_str())
    }
}
