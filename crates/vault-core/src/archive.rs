//! Archiver: pack an output location into `<app>_backup.zip`

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use vault_fs::constants::ARCHIVE_EXTENSION;
use vault_fs::io::{persist, temp_sibling};

use crate::{Error, Result};

/// A finished archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveArtifact {
    pub path: PathBuf,
    /// Number of entries, directories included
    pub entries: usize,
    /// Uncompressed size of the archived files
    pub bytes: u64,
}

/// What happened to an application's archive during a backup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "archive", rename_all = "snake_case")]
pub enum ArchiveOutcome {
    /// Compression was not requested, or the run was a restore
    #[default]
    NotRequested,
    /// Requested, but nothing was captured
    NoData,
    Created(ArchiveArtifact),
    Failed { error: String },
}

/// Path of the archive produced for `dest_without_extension`.
pub fn archive_file_name(dest_without_extension: &Path) -> PathBuf {
    let mut name = OsString::from(dest_without_extension.as_os_str());
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}

/// Zip `source_dir` into `<dest_without_extension>.zip`.
///
/// Entries are relative to `source_dir` with forward slashes; directories
/// get their own entries. The archive is built under a temporary name and
/// renamed into place, replacing any earlier archive.
pub fn compress(source_dir: &Path, dest_without_extension: &Path) -> Result<ArchiveArtifact> {
    let path = archive_file_name(dest_without_extension);
    if !source_dir.is_dir() {
        return Err(Error::Archive {
            path,
            message: format!("{} is not a directory", source_dir.display()),
        });
    }

    let temp_path = temp_sibling(&path);
    match write_zip(source_dir, &temp_path) {
        Ok((entries, bytes)) => {
            persist(&temp_path, &path)?;
            tracing::debug!(path = %path.display(), entries, bytes, "Archive written");
            Ok(ArchiveArtifact {
                path,
                entries,
                bytes,
            })
        }
        Err(message) => {
            let _ = fs::remove_file(&temp_path);
            Err(Error::Archive { path, message })
        }
    }
}

fn write_zip(source_dir: &Path, out: &Path) -> std::result::Result<(usize, u64), String> {
    let file = File::create(out).map_err(|e| format!("{}: {e}", out.display()))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0;
    let mut bytes = 0;
    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| e.to_string())?;
        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        let name = relative.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(format!("{name}/"), options)
                .map_err(|e| e.to_string())?;
        } else if entry.file_type().is_file() {
            writer
                .start_file(name, options)
                .map_err(|e| e.to_string())?;
            let mut input =
                File::open(entry.path()).map_err(|e| format!("{}: {e}", entry.path().display()))?;
            bytes += io::copy(&mut input, &mut writer)
                .map_err(|e| format!("{}: {e}", entry.path().display()))?;
        } else {
            continue;
        }
        entries += 1;
    }

    let mut inner = writer.finish().map_err(|e| e.to_string())?;
    io::Write::flush(&mut inner).map_err(|e| e.to_string())?;
    inner
        .get_ref()
        .sync_all()
        .map_err(|e| format!("{}: {e}", out.display()))?;
    Ok((entries, bytes))
}
