//! Engine settings (`Config/appvault.toml`)
//!
//! All fields are optional in the file. Relative paths are resolved against
//! the working directory the settings were loaded for.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vault_fs::{BackupLayout, ConfigStore, VaultPath};
use vault_meta::CatalogLoader;

use crate::log_sink::LogSink;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VaultConfig {
    /// Root of all per-application output locations
    pub backup_root: PathBuf,
    /// Directory of base catalog fragments
    pub plugins_dir: PathBuf,
    /// User override catalog
    pub rules_file: PathBuf,
    /// Directory of the action log
    pub log_dir: PathBuf,
    /// Archive each application after backup
    pub compress: bool,
    /// Skip applications not detected as installed
    pub installed_only: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            backup_root: PathBuf::from(VaultPath::BackupDir.as_str()),
            plugins_dir: PathBuf::from(VaultPath::PluginsDir.as_str()),
            rules_file: Path::new(VaultPath::ConfigDir.as_str()).join(VaultPath::CustomRules.as_str()),
            log_dir: PathBuf::from(VaultPath::LogsDir.as_str()),
            compress: false,
            installed_only: false,
        }
    }
}

/// Settings file extensions in lookup order.
const SETTINGS_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

impl VaultConfig {
    /// Location of the settings file for `work_dir`.
    ///
    /// `Config/appvault.toml` is preferred; `appvault.yaml`, `appvault.yml`
    /// and `appvault.json` are used when only one of them exists.
    pub fn settings_path(work_dir: &Path) -> PathBuf {
        let default = work_dir
            .join(VaultPath::ConfigDir.as_str())
            .join(VaultPath::SettingsFile.as_str());
        SETTINGS_EXTENSIONS
            .iter()
            .map(|ext| default.with_extension(ext))
            .find(|path| path.is_file())
            .unwrap_or(default)
    }

    /// Load settings for `work_dir`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if the file cannot be parsed or names
    /// unusable paths.
    pub fn load(work_dir: &Path) -> Result<Self> {
        Self::load_from(&Self::settings_path(work_dir), work_dir)
    }

    /// Load settings from an explicit file, resolving paths against `work_dir`.
    pub fn load_from(path: &Path, work_dir: &Path) -> Result<Self> {
        let config: Option<Self> = ConfigStore::new().load_optional(path).map_err(|e| match e {
            vault_fs::Error::ConfigParse { .. } | vault_fs::Error::UnsupportedFormat { .. } => {
                Error::invalid_config(e.to_string())
            }
            other => Error::Fs(other),
        })?;
        if config.is_some() {
            tracing::debug!(path = %path.display(), "Loaded settings");
        }
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config.resolve(work_dir))
    }

    /// Reject settings that cannot describe a working layout.
    pub fn validate(&self) -> Result<()> {
        let empty = |p: &Path| p.as_os_str().is_empty();
        if empty(&self.backup_root) {
            return Err(Error::invalid_config("backup_root must not be empty"));
        }
        if empty(&self.plugins_dir) {
            return Err(Error::invalid_config("plugins_dir must not be empty"));
        }
        if self.rules_file.file_name().is_none() {
            return Err(Error::invalid_config("rules_file must name a file"));
        }
        if empty(&self.log_dir) {
            return Err(Error::invalid_config("log_dir must not be empty"));
        }
        if self.backup_root == self.plugins_dir {
            return Err(Error::invalid_config(
                "backup_root and plugins_dir must differ",
            ));
        }
        Ok(())
    }

    /// Make every relative path absolute under `work_dir`.
    pub fn resolve(mut self, work_dir: &Path) -> Self {
        for path in [
            &mut self.backup_root,
            &mut self.plugins_dir,
            &mut self.rules_file,
            &mut self.log_dir,
        ] {
            if path.is_relative() {
                *path = work_dir.join(&*path);
            }
        }
        self
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(VaultPath::LogFile.as_str())
    }

    pub fn layout(&self) -> BackupLayout {
        BackupLayout::new(&self.backup_root)
    }

    pub fn log_sink(&self) -> LogSink {
        LogSink::new(self.log_file())
    }

    pub fn catalog_loader(&self) -> CatalogLoader {
        CatalogLoader::new(&self.plugins_dir).with_rules(&self.rules_file)
    }
}
