//! Error types for vault-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end the invocation with exit code 1
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from vault-core
    #[error(transparent)]
    Core(#[from] vault_core::Error),

    /// Error from vault-meta
    #[error(transparent)]
    Meta(#[from] vault_meta::Error),

    /// Error from vault-fs
    #[error(transparent)]
    Fs(#[from] vault_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
