//! Well-known names in the AppVault working layout.

use std::path::Path;

/// Default directory and file names, relative to the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultPath {
    /// Root of all per-application output locations
    BackupDir,
    /// Directory of base catalog fragments (`*.json`)
    PluginsDir,
    /// Directory holding user configuration
    ConfigDir,
    /// User override catalog inside [`VaultPath::ConfigDir`]
    CustomRules,
    /// Engine settings inside [`VaultPath::ConfigDir`]
    SettingsFile,
    /// Directory of the persistent action log
    LogsDir,
    /// Persistent action log inside [`VaultPath::LogsDir`]
    LogFile,
    /// Advisory lock held inside the backup root while a run is active
    LockFile,
}

impl VaultPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackupDir => "Backup",
            Self::PluginsDir => "Plugins",
            Self::ConfigDir => "Config",
            Self::CustomRules => "custom_rules.json",
            Self::SettingsFile => "appvault.toml",
            Self::LogsDir => "Logs",
            Self::LogFile => "backup.log",
            Self::LockFile => ".appvault.lock",
        }
    }
}

impl AsRef<Path> for VaultPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for VaultPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for VaultPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suffix appended to the application name for its archive.
pub const ARCHIVE_SUFFIX: &str = "_backup";

/// Archive container extension.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Suffix appended to the application name for its registry export.
pub const REGISTRY_SUFFIX: &str = "_reg";

/// Registry export extension.
pub const REGISTRY_EXTENSION: &str = "reg";
