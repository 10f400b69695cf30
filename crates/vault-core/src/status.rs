//! Summaries of what a backup root currently holds

use std::path::PathBuf;

use serde::Serialize;
use vault_fs::BackupLayout;
use vault_fs::checksum::compute_tree_checksum;

use crate::Result;

/// Contents of one application's output location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSummary {
    pub app: String,
    pub files: usize,
    pub bytes: u64,
    /// Content digest of the output location; equal digests mean equal trees
    pub checksum: String,
    pub registry_exports: usize,
    pub archive: Option<PathBuf>,
}

/// Summarize the output location of `app`, or `None` if it was never
/// backed up.
pub fn summarize_output(layout: &BackupLayout, app: &str) -> Result<Option<OutputSummary>> {
    let dir = layout.app_dir(app);
    if !dir.is_dir() {
        return Ok(None);
    }
    let digest = compute_tree_checksum(&dir)?;
    let archive = layout.archive_path(app);
    Ok(Some(OutputSummary {
        app: app.to_string(),
        files: digest.files,
        bytes: digest.bytes,
        checksum: digest.checksum,
        registry_exports: layout.registry_files(app).len(),
        archive: archive.is_file().then_some(archive),
    }))
}

/// Applications that have an output location under the backup root, sorted.
pub fn backed_up_apps(layout: &BackupLayout) -> Result<Vec<String>> {
    let root = layout.root();
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut apps = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| vault_fs::Error::io(root, e))? {
        let entry = entry.map_err(|e| vault_fs::Error::io(root, e))?;
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            apps.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    apps.sort();
    Ok(apps)
}
