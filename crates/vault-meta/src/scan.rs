//! Discovery of candidate configuration files
//!
//! Walks the usual per-user settings directories and returns small files with
//! configuration-like extensions, to seed the `files` list of a new plugin.

use std::path::PathBuf;

use vault_fs::Environment;
use walkdir::WalkDir;

const DEFAULT_ROOTS: &[&str] = &["%APPDATA%", "%LOCALAPPDATA%", r"%USERPROFILE%\Documents"];
const DEFAULT_EXTENSIONS: &[&str] = &["ini", "json", "cfg", "xml"];
const DEFAULT_MAX_SIZE: u64 = 5_000_000;

/// Configurable scan over a set of base directories.
#[derive(Debug, Clone)]
pub struct ConfigScanner {
    roots: Vec<String>,
    extensions: Vec<String>,
    max_size: u64,
}

impl Default for ConfigScanner {
    fn default() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl ConfigScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the base directories. Entries may contain placeholders.
    pub fn with_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Files of this size or larger are not reported.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    fn matches_extension(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.extensions.iter().any(|known| *known == e))
    }

    /// Walk every root and collect matching files.
    ///
    /// Roots that do not expand to an existing directory and entries that
    /// cannot be read are skipped.
    pub fn scan(&self, env: &Environment) -> Vec<PathBuf> {
        let mut found = Vec::new();
        for root in &self.roots {
            let base = env.expand_path(root).to_native();
            if !base.is_dir() {
                tracing::debug!(root = %root, "scan root not found");
                continue;
            }

            let before = found.len();
            for entry in WalkDir::new(&base).sort_by_file_name().into_iter().flatten() {
                if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                    continue;
                }
                let Ok(metadata) = entry.metadata() else {
                    continue;
                };
                if metadata.len() < self.max_size {
                    found.push(entry.into_path());
                }
            }
            tracing::debug!(root = %base.display(), found = found.len() - before, "scanned");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_config_files_by_extension() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("App/sub")).unwrap();
        fs::write(temp.path().join("App/settings.ini"), "a=1").unwrap();
        fs::write(temp.path().join("App/sub/prefs.JSON"), "{}").unwrap();
        fs::write(temp.path().join("App/cache.bin"), "xx").unwrap();

        let env = Environment::from_pairs([("BASE", temp.path().to_string_lossy().to_string())]);
        let found = ConfigScanner::new().with_roots(["%BASE%"]).scan(&env);

        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["settings.ini", "prefs.JSON"]);
    }

    #[test]
    fn skips_large_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.xml"), vec![b'x'; 64]).unwrap();
        fs::write(temp.path().join("small.xml"), "<a/>").unwrap();

        let env = Environment::from_pairs([("BASE", temp.path().to_string_lossy().to_string())]);
        let found = ConfigScanner::new()
            .with_roots(["%BASE%"])
            .with_max_size(64)
            .scan(&env);

        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("small.xml"));
    }

    #[test]
    fn unresolved_roots_are_skipped() {
        let found = ConfigScanner::new()
            .with_roots(["%SURELY_NOT_SET_ANYWHERE%"])
            .scan(&Environment::empty());
        assert!(found.is_empty());
    }
}
