//! Error types for vault-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] vault_fs::Error),

    #[error("Plugin directory {path} cannot be read: {source}")]
    PluginsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid application name '{name}': {message}")]
    InvalidName { name: String, message: String },

    #[error("Plugin '{name}' declares no files, folders or registry keys")]
    EmptyPlugin { name: String },
}
