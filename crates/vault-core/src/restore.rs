//! Restore engine: copy captured resources back and re-import registry
//! exports

use std::path::{Path, PathBuf};

use serde::Serialize;
use vault_fs::{Environment, copy_file, copy_tree};
use vault_meta::ResourceKind;

use crate::context::RunContext;
use crate::outcome::ResourceOutcome;
use crate::registry::RegistryError;

/// Where restored files and folders go. Applies to a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreTarget {
    /// Back to the expanded declared path
    #[default]
    Original,
    /// Into this directory, by base name
    CustomRoot(PathBuf),
}

impl RestoreTarget {
    /// Destination for a declared path, or `None` when it has no base name.
    pub fn destination(&self, env: &Environment, declared: &str) -> Option<PathBuf> {
        let expanded = env.expand_path(declared);
        match self {
            Self::Original => Some(expanded.to_native()),
            Self::CustomRoot(root) => expanded.file_name().map(|base| root.join(base)),
        }
    }
}

/// Copy a captured file to `dest`, creating parent directories.
///
/// A missing capture is a `NotFound` no-op.
pub fn restore_file(ctx: &RunContext, captured: &Path, dest: &Path) -> ResourceOutcome {
    let kind = ResourceKind::File;
    let source = captured.display().to_string();
    if !captured.exists() {
        tracing::debug!(path = %source, "Nothing captured to restore");
        return ResourceOutcome::not_found(kind, source);
    }

    match copy_file(captured, dest) {
        Ok(_) => {
            ctx.info(format!("restored file {} -> {}", source, dest.display()));
            ResourceOutcome::done(kind, source, dest)
        }
        Err(e) => {
            ctx.error(format!("restore file {source}: {e}"));
            ResourceOutcome::failed(kind, source, e)
        }
    }
}

/// Copy a captured tree to `dest`, merging with whatever is there.
pub fn restore_folder(ctx: &RunContext, captured: &Path, dest: &Path) -> ResourceOutcome {
    let kind = ResourceKind::Folder;
    let source = captured.display().to_string();
    if !captured.exists() {
        tracing::debug!(path = %source, "Nothing captured to restore");
        return ResourceOutcome::not_found(kind, source);
    }

    match copy_tree(captured, dest) {
        Ok(stats) => {
            ctx.info(format!(
                "restored folder {} -> {} ({} files)",
                source,
                dest.display(),
                stats.files
            ));
            ResourceOutcome::done(kind, source, dest)
        }
        Err(e) => {
            ctx.error(format!("restore folder {source}: {e}"));
            ResourceOutcome::failed(kind, source, e)
        }
    }
}

/// Import a registry export into the key recorded inside it.
pub fn restore_registry_key(ctx: &RunContext, key_file: &Path) -> ResourceOutcome {
    let kind = ResourceKind::Registry;
    let source = key_file.display().to_string();
    if !key_file.is_file() {
        return ResourceOutcome::not_found(kind, source);
    }

    match ctx.registry().import(key_file) {
        Ok(()) => {
            ctx.info(format!("imported registry {source}"));
            ResourceOutcome::done(kind, source, key_file)
        }
        Err(RegistryError::Unsupported) => {
            ctx.warn(format!("import registry {source}: registry not available"));
            ResourceOutcome::unsupported(kind, source)
        }
        Err(e) => {
            ctx.error(format!("import registry {source}: {e}"));
            ResourceOutcome::failed(kind, source, e)
        }
    }
}
