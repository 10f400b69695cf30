//! Writing plugin fragments
//!
//! Each plugin is a single-entry catalog fragment named after its
//! application: `Plugins/example_<slug>.json`.

use std::path::{Path, PathBuf};

use vault_fs::{ConfigStore, validate_path_identifier};

use crate::builtins::builtin_plugins;
use crate::{Catalog, Error, ResourceSpec, Result};

/// File name of the fragment for `name`.
///
/// The slug lowercases the name, turns spaces into `_` and drops `.` and `-`.
pub fn plugin_file_name(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("example_{slug}.json")
}

/// A plugin directory that fragments can be written to.
#[derive(Debug, Clone)]
pub struct PluginStore {
    dir: PathBuf,
    store: ConfigStore,
}

impl PluginStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            store: ConfigStore::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the fragment for `name` is stored at.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(plugin_file_name(name))
    }

    /// Write `{name: spec}` as a fragment, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Rejects names that cannot be used as a directory component and specs
    /// that declare nothing.
    pub fn save(&self, name: &str, spec: &ResourceSpec) -> Result<PathBuf> {
        validate_path_identifier(name, "Application name").map_err(|message| {
            Error::InvalidName {
                name: name.to_string(),
                message,
            }
        })?;
        if spec.is_empty() {
            return Err(Error::EmptyPlugin {
                name: name.to_string(),
            });
        }

        let mut fragment = Catalog::new();
        fragment.insert(name, spec.clone());

        let path = self.path_for(name);
        self.store.save(&path, &fragment)?;
        tracing::info!(app = %name, path = %path.display(), "plugin saved");
        Ok(path)
    }

    /// Write one fragment per built-in application.
    pub fn install_builtins(&self) -> Result<Vec<PathBuf>> {
        builtin_plugins()
            .iter()
            .map(|(name, spec)| self.save(name, spec))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Google Chrome", "example_google_chrome.json")]
    #[case("Battle.net", "example_battlenet.json")]
    #[case("7-Zip", "example_7zip.json")]
    #[case("Notepad++", "example_notepad++.json")]
    #[case("Node.js", "example_nodejs.json")]
    fn test_plugin_file_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(plugin_file_name(name), expected);
    }
}
