//! Registry backend abstraction
//!
//! Capture and restore talk to the registry only through
//! [`RegistryBackend`], so the engines run unchanged on machines without a
//! registry and in tests.

mod key;
mod memory;
mod reg_tool;

pub use key::{Hive, RegistryKey};
pub use memory::MemoryRegistry;
pub use reg_tool::{RegTool, parse_app_path_names, parse_display_names};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Failures of the registry mechanism itself.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No registry exists on this platform
    #[error("Registry is not available on this platform")]
    Unsupported,

    /// Identifier is not `HIVE\subkey`
    #[error("Invalid registry key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// External tool ran and reported failure
    #[error("{command} exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// External tool could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Export file could not be read or written
    #[error("Registry file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Probe, export and import registry keys.
///
/// Implementations must be safe to share with a worker thread.
pub trait RegistryBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether this backend can reach a real registry.
    fn is_available(&self) -> bool;

    /// True iff `key` can be opened read-only. Never fails.
    fn key_exists(&self, key: &RegistryKey) -> bool;

    /// Export the subtree of `key` to `out_file`, overwriting it.
    fn export(&self, key: &RegistryKey, out_file: &Path) -> Result<(), RegistryError>;

    /// Import a previously exported file into the key embedded in it.
    fn import(&self, key_file: &Path) -> Result<(), RegistryError>;

    /// Display names of installed applications. Empty when unknown.
    fn installed_display_names(&self) -> BTreeSet<String>;
}

/// Backend for platforms without a registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRegistry;

impl RegistryBackend for UnsupportedRegistry {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn key_exists(&self, _key: &RegistryKey) -> bool {
        false
    }

    fn export(&self, _key: &RegistryKey, _out_file: &Path) -> Result<(), RegistryError> {
        Err(RegistryError::Unsupported)
    }

    fn import(&self, _key_file: &Path) -> Result<(), RegistryError> {
        Err(RegistryError::Unsupported)
    }

    fn installed_display_names(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// Backend matching the current platform.
pub fn platform_backend() -> Arc<dyn RegistryBackend> {
    if cfg!(windows) {
        Arc::new(RegTool::new())
    } else {
        Arc::new(UnsupportedRegistry)
    }
}

/// Probe a catalog identifier. Unparseable identifiers are absent.
pub fn registry_key_exists(backend: &dyn RegistryBackend, key: &str) -> bool {
    match RegistryKey::parse(key) {
        Ok(key) => backend.key_exists(&key),
        Err(e) => {
            tracing::debug!(key, error = %e, "Ignoring unparseable registry key");
            false
        }
    }
}
