//! SHA-256 checksums of whole output locations
//!
//! A tree checksum covers relative paths and file contents, so two output
//! locations with identical contents produce the same digest regardless of
//! modification times or traversal order.

use std::path::Path;

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Summary of a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDigest {
    pub checksum: String,
    pub files: usize,
    pub bytes: u64,
}

/// Compute a content digest over every file below `root`.
pub fn compute_tree_checksum(root: &Path) -> Result<TreeDigest> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        entries.push((relative, entry.into_path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut hasher = Sha256::new();
    let mut bytes = 0u64;
    for (relative, path) in &entries {
        let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        bytes += content.len() as u64;
        hasher.update(relative.as_bytes());
        hasher.update([0u8]);
        hasher.update((content.len() as u64).to_le_bytes());
        hasher.update(&content);
    }

    Ok(TreeDigest {
        checksum: format!("{}{:x}", PREFIX, hasher.finalize()),
        files: entries.len(),
        bytes,
    })
}
