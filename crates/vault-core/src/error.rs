//! Error types for vault-core
//!
//! Only conditions that stop a whole invocation are errors. Per-resource
//! failures during a run are reported as [`crate::ResourceOutcome`] values.

use std::path::PathBuf;

use crate::registry::RegistryError;

/// Result type for vault-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vault-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Another run holds the advisory lock on the backup root
    #[error("A run is already in progress for {root}")]
    RunInProgress { root: PathBuf },

    /// Run or engine configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Archive could not be produced
    #[error("Archive {path} failed: {message}")]
    Archive { path: PathBuf, message: String },

    /// The worker thread of a spawned run panicked
    #[error("Run worker panicked")]
    WorkerPanicked,

    /// Registry mechanism failure
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Filesystem error from vault-fs
    #[error(transparent)]
    Fs(#[from] vault_fs::Error),

    /// Catalog error from vault-meta
    #[error(transparent)]
    Meta(#[from] vault_meta::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
