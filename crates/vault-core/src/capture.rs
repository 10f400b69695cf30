//! Capture engine: copy declared resources into an application's output
//! location
//!
//! Every operation returns a [`ResourceOutcome`] and records one action line
//! whether it succeeds or fails. Nothing here aborts a run.

use std::fs;
use std::path::{Path, PathBuf};

use vault_fs::{copy_file, copy_tree};
use vault_meta::ResourceKind;

use crate::context::RunContext;
use crate::outcome::ResourceOutcome;
use crate::registry::{RegistryError, RegistryKey};

/// Expanded native path of `declared` and its base name.
pub(crate) fn resolve(ctx: &RunContext, declared: &str) -> Option<(PathBuf, String)> {
    let expanded = ctx.env().expand_path(declared);
    let base = expanded.file_name()?.to_string();
    Some((expanded.to_native(), base))
}

/// Copy the file at `src` into `out_dir`, keeping its base name.
pub fn capture_file(ctx: &RunContext, src: &str, out_dir: &Path) -> ResourceOutcome {
    let kind = ResourceKind::File;
    let Some((source, base)) = resolve(ctx, src) else {
        ctx.error(format!("capture file {src}: path has no file name"));
        return ResourceOutcome::failed(kind, src, "path has no file name");
    };
    let destination = out_dir.join(&base);

    match copy_file(&source, &destination) {
        Ok(bytes) => {
            tracing::debug!(kind = %kind, path = %source.display(), bytes, "Captured");
            ctx.info(format!(
                "captured file {} -> {}",
                source.display(),
                destination.display()
            ));
            ResourceOutcome::done(kind, src, destination)
        }
        Err(e) => {
            ctx.error(format!("capture file {}: {e}", source.display()));
            ResourceOutcome::failed(kind, src, e)
        }
    }
}

/// Copy the directory tree at `src` into `out_dir/<basename>`, merging with
/// an earlier capture.
pub fn capture_folder(ctx: &RunContext, src: &str, out_dir: &Path) -> ResourceOutcome {
    let kind = ResourceKind::Folder;
    let Some((source, base)) = resolve(ctx, src) else {
        ctx.error(format!("capture folder {src}: path has no folder name"));
        return ResourceOutcome::failed(kind, src, "path has no folder name");
    };
    let destination = out_dir.join(&base);

    match copy_tree(&source, &destination) {
        Ok(stats) => {
            tracing::debug!(
                kind = %kind,
                path = %source.display(),
                files = stats.files,
                bytes = stats.bytes,
                "Captured"
            );
            ctx.info(format!(
                "captured folder {} -> {} ({} files)",
                source.display(),
                destination.display(),
                stats.files
            ));
            ResourceOutcome::done(kind, src, destination)
        }
        Err(e) => {
            ctx.error(format!("capture folder {}: {e}", source.display()));
            ResourceOutcome::failed(kind, src, e)
        }
    }
}

/// Export the registry subtree of `key` to `out_file`, overwriting it.
pub fn capture_registry_key(ctx: &RunContext, key: &str, out_file: &Path) -> ResourceOutcome {
    let kind = ResourceKind::Registry;
    let parsed = match RegistryKey::parse(key) {
        Ok(parsed) => parsed,
        Err(e) => {
            ctx.error(format!("export registry {key}: {e}"));
            return ResourceOutcome::failed(kind, key, e);
        }
    };

    if let Some(parent) = out_file.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        ctx.error(format!("export registry {key}: {e}"));
        return ResourceOutcome::failed(kind, key, vault_fs::Error::io(parent, e));
    }

    match ctx.registry().export(&parsed, out_file) {
        Ok(()) => {
            ctx.info(format!(
                "exported registry {} -> {}",
                parsed,
                out_file.display()
            ));
            ResourceOutcome::done(kind, key, out_file)
        }
        Err(RegistryError::Unsupported) => {
            ctx.warn(format!("export registry {key}: registry not available"));
            ResourceOutcome::unsupported(kind, key)
        }
        Err(e) => {
            ctx.error(format!("export registry {key}: {e}"));
            ResourceOutcome::failed(kind, key, e)
        }
    }
}
