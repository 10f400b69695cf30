//! [`TestVault`] builder for backup/restore scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// Environment variable that points at [`TestVault::home`] in test snapshots.
pub const HOME_VAR: &str = "VAULT_TEST_HOME";

/// A temporary working directory laid out like a real installation:
///
/// ```text
/// <root>/
///   Backup/                  backup root
///   Plugins/                 base catalog fragments
///   Config/custom_rules.json user overrides
///   Logs/backup.log          action log
///   home/                    source data referenced as %VAULT_TEST_HOME%
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use vault_test_utils::TestVault;
///
/// let vault = TestVault::new();
/// vault.write_home_file("editor/settings.ini", "font=12");
/// vault.write_plugin("example_editor.json", serde_json::json!({
///     "Editor": {"files": ["%VAULT_TEST_HOME%/editor/settings.ini"]}
/// }));
/// ```
pub struct TestVault {
    temp_dir: TempDir,
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

impl TestVault {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("TestVault::new: failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("home")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn backup_root(&self) -> PathBuf {
        self.root().join("Backup")
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root().join("Plugins")
    }

    pub fn rules_file(&self) -> PathBuf {
        self.root().join("Config").join("custom_rules.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root().join("Logs").join("backup.log")
    }

    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    /// `(HOME_VAR, home)` for building an environment snapshot.
    pub fn env_pairs(&self) -> Vec<(String, String)> {
        vec![(HOME_VAR.to_string(), self.home().to_string_lossy().to_string())]
    }

    /// Catalog path of a file under [`TestVault::home`], using the placeholder.
    pub fn home_entry(&self, relative: &str) -> String {
        format!("%{HOME_VAR}%/{relative}")
    }

    /// Write a file below the home directory, creating parents.
    pub fn write_home_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.home().join(relative);
        write(&path, content.as_bytes());
        path
    }

    /// Create a directory below the home directory.
    pub fn create_home_dir(&self, relative: &str) -> PathBuf {
        let path = self.home().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a base catalog fragment into the plugin directory.
    pub fn write_plugin(&self, file_name: &str, fragment: Value) -> PathBuf {
        let path = self.plugins_dir().join(file_name);
        write(&path, serde_json::to_string_pretty(&fragment).unwrap().as_bytes());
        path
    }

    /// Write raw bytes as a plugin fragment, for malformed input tests.
    pub fn write_raw_plugin(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.plugins_dir().join(file_name);
        write(&path, content.as_bytes());
        path
    }

    /// Write the user override fragment.
    pub fn write_rules(&self, fragment: Value) -> PathBuf {
        let path = self.rules_file();
        write(&path, serde_json::to_string_pretty(&fragment).unwrap().as_bytes());
        path
    }

    /// Contents of the action log, or an empty string when none was written.
    pub fn log_contents(&self) -> String {
        fs::read_to_string(self.log_file()).unwrap_or_default()
    }

    /// Assert that `path` exists and holds exactly `expected`.
    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        let actual = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("expected {} to be readable: {e}", path.display()));
        assert_eq!(actual, expected, "unexpected content in {}", path.display());
    }

    /// Assert that `path` does not exist.
    pub fn assert_missing(&self, path: &Path) {
        assert!(!path.exists(), "expected {} to be absent", path.display());
    }
}

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
