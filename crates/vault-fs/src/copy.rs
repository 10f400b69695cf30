//! Overwrite-or-merge copy primitives
//!
//! Both helpers are safe to re-run: files at the destination are overwritten
//! and existing directory trees are merged into, never rejected.

use std::fs::{self, File};
use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, Result};

/// Counters for a completed tree copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// Copy a single file, overwriting `dst` and preserving the modification time.
///
/// Parent directories of `dst` are created when missing.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    let metadata = fs::metadata(src).map_err(|e| Error::io(src, e))?;
    if !metadata.is_file() {
        return Err(Error::KindMismatch {
            path: src.to_path_buf(),
            expected: "file",
        });
    }

    if let Some(parent) = dst.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let bytes = fs::copy(src, dst).map_err(|e| Error::io(dst, e))?;

    // Read-only copies cannot be reopened for writing; their mtime is left as is.
    if let Ok(modified) = metadata.modified()
        && let Ok(file) = File::options().write(true).open(dst)
        && let Err(e) = file.set_modified(modified)
    {
        tracing::debug!(path = %dst.display(), error = %e, "could not preserve mtime");
    }

    Ok(bytes)
}

/// Recursively copy `src` into `dst`, merging with anything already there.
///
/// Symlinked directories are copied as directories with their contents.
/// An entry that cannot be copied does not stop the walk: every other entry
/// is still copied and the failures are reported together at the end.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<CopyStats> {
    if !src.is_dir() {
        return Err(Error::KindMismatch {
            path: src.to_path_buf(),
            expected: "directory",
        });
    }

    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;
    let mut stats = CopyStats::default();
    let mut failures = Vec::new();

    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(src).to_path_buf();
                failures.push(Error::io(path, e.into()));
                continue;
            }
        };
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            match fs::create_dir_all(&target) {
                Ok(()) => stats.directories += 1,
                Err(e) => failures.push(Error::io(&target, e)),
            }
        } else {
            match copy_file(entry.path(), &target) {
                Ok(bytes) => {
                    stats.bytes += bytes;
                    stats.files += 1;
                }
                Err(e) => failures.push(e),
            }
        }
    }

    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        files = stats.files,
        failed = failures.len(),
        "copied tree"
    );

    let failed = failures.len();
    match failures.into_iter().next() {
        None => Ok(stats),
        Some(first) => Err(Error::PartialCopy {
            path: src.to_path_buf(),
            copied: stats.files,
            failed,
            first: Box::new(first),
        }),
    }
}
