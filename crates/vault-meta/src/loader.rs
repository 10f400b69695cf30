//! Loader for catalog fragments
//!
//! ```text
//! Plugins/
//!   example_google_chrome.json   base fragments, merged in file-name order
//!   example_zoom.json
//! Config/
//!   custom_rules.json            user overrides, merged last
//! ```
//!
//! A fragment that cannot be read or parsed is skipped and recorded in the
//! [`LoadReport`]; loading never stops because of one bad file.

use std::fs;
use std::path::{Path, PathBuf};

use vault_fs::ConfigStore;

use crate::{Catalog, Error, Result};

/// A fragment that was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFragment {
    pub path: PathBuf,
    pub reason: String,
}

/// Which fragments contributed to a catalog.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Fragments merged, in merge order
    pub loaded: Vec<PathBuf>,
    /// Fragments skipped because they were unreadable or malformed
    pub skipped: Vec<SkippedFragment>,
}

/// Result of a catalog load.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub report: LoadReport,
}

/// Loads the base plugin set and the user override file.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    plugins_dir: PathBuf,
    rules_file: Option<PathBuf>,
    store: ConfigStore,
}

impl CatalogLoader {
    /// Create a loader reading base fragments from `plugins_dir`.
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            rules_file: None,
            store: ConfigStore::new(),
        }
    }

    /// Merge `rules_file` after every plugin fragment.
    pub fn with_rules(mut self, rules_file: impl Into<PathBuf>) -> Self {
        self.rules_file = Some(rules_file.into());
        self
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }

    /// Load and merge every fragment.
    ///
    /// # Errors
    ///
    /// Only when the plugin directory exists but cannot be listed. A missing
    /// directory yields an empty base set.
    pub fn load(&self) -> Result<LoadedCatalog> {
        let mut loaded = LoadedCatalog::default();

        for path in self.plugin_files()? {
            self.merge_fragment(&path, &mut loaded);
        }

        if let Some(rules) = &self.rules_file {
            if rules.exists() {
                self.merge_fragment(rules, &mut loaded);
            } else {
                tracing::debug!(path = %rules.display(), "no custom rules file");
            }
        }

        tracing::info!(
            applications = loaded.catalog.len(),
            fragments = loaded.report.loaded.len(),
            skipped = loaded.report.skipped.len(),
            "catalog loaded"
        );
        Ok(loaded)
    }

    /// Plugin fragment paths in merge order.
    fn plugin_files(&self) -> Result<Vec<PathBuf>> {
        if !self.plugins_dir.exists() {
            tracing::debug!(path = %self.plugins_dir.display(), "plugin directory missing");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.plugins_dir).map_err(|source| Error::PluginsUnreadable {
            path: self.plugins_dir.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        Ok(files)
    }

    fn merge_fragment(&self, path: &Path, loaded: &mut LoadedCatalog) {
        match self.store.load::<Catalog>(path) {
            Ok(fragment) => {
                loaded.catalog.merge(fragment);
                loaded.report.loaded.push(path.to_path_buf());
            }
            Err(e) => {
                tracing::warn!("Failed to load {:?}: {}", path, e);
                loaded.report.skipped.push(SkippedFragment {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }
}
