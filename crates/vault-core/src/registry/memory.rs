//! In-memory registry for tests and dry environments

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{RegistryBackend, RegistryError, RegistryKey};

const EXPORT_HEADER: &str = "Windows Registry Editor Version 5.00";

#[derive(Debug, Default)]
struct State {
    /// Lowercased full key name -> (display name, payload)
    keys: BTreeMap<String, (String, String)>,
    failing: BTreeSet<String>,
    installed: BTreeSet<String>,
    exports: Vec<(String, PathBuf)>,
    imports: Vec<PathBuf>,
}

/// A registry held in memory that writes `.reg`-shaped export files.
///
/// Exported files carry the key header and payload, so importing one
/// recreates the key. Every export and import call is recorded.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    state: Mutex<State>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a key with the given export payload. Invalid identifiers are ignored.
    pub fn with_key(self, key: &str, payload: impl Into<String>) -> Self {
        if let Ok(key) = RegistryKey::parse(key) {
            self.insert(&key, payload.into());
        }
        self
    }

    /// Make exports of `key` fail with a command error.
    pub fn with_failing_key(self, key: &str) -> Self {
        if let Ok(key) = RegistryKey::parse(key) {
            self.state().failing.insert(normalize(&key));
        }
        self
    }

    /// Report `names` as installed applications.
    pub fn with_installed<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state()
            .installed
            .extend(names.into_iter().map(Into::into));
        self
    }

    fn insert(&self, key: &RegistryKey, payload: String) {
        self.state()
            .keys
            .insert(normalize(key), (key.full_name(), payload));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        RegistryKey::parse(key).is_ok_and(|key| self.key_exists(&key))
    }

    /// Payload currently stored under `key`.
    pub fn payload(&self, key: &str) -> Option<String> {
        let key = RegistryKey::parse(key).ok()?;
        self.state().keys.get(&normalize(&key)).map(|(_, p)| p.clone())
    }

    /// Delete `key`, returning whether it existed.
    pub fn remove_key(&self, key: &str) -> bool {
        RegistryKey::parse(key)
            .is_ok_and(|key| self.state().keys.remove(&normalize(&key)).is_some())
    }

    /// Keys exported so far, in call order.
    pub fn exports(&self) -> Vec<(String, PathBuf)> {
        self.state().exports.clone()
    }

    /// Files imported so far, in call order.
    pub fn imports(&self) -> Vec<PathBuf> {
        self.state().imports.clone()
    }
}

fn normalize(key: &RegistryKey) -> String {
    key.full_name().to_lowercase()
}

fn render(name: &str, payload: &str) -> String {
    format!("{EXPORT_HEADER}\r\n\r\n[{name}]\r\n{payload}\r\n")
}

/// Split an export file into its key name and payload.
fn parse_export(content: &str) -> Option<(String, String)> {
    let mut lines = content.lines().map(str::trim_end);
    if lines.next()?.trim_start_matches('\u{feff}') != EXPORT_HEADER {
        return None;
    }
    let header = lines.find(|l| !l.is_empty())?;
    let name = header.strip_prefix('[')?.strip_suffix(']')?.to_string();
    let payload = lines.collect::<Vec<_>>().join("\r\n").trim().to_string();
    Some((name, payload))
}

impl RegistryBackend for MemoryRegistry {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn key_exists(&self, key: &RegistryKey) -> bool {
        self.state().keys.contains_key(&normalize(key))
    }

    fn export(&self, key: &RegistryKey, out_file: &Path) -> Result<(), RegistryError> {
        let normalized = normalize(key);
        let mut state = self.state();
        state.exports.push((key.full_name(), out_file.to_path_buf()));

        if state.failing.contains(&normalized) {
            return Err(RegistryError::CommandFailed {
                command: "memory export".into(),
                code: 1,
                stderr: format!("access denied: {}", key.full_name()),
            });
        }
        let Some((name, payload)) = state.keys.get(&normalized) else {
            return Err(RegistryError::CommandFailed {
                command: "memory export".into(),
                code: 1,
                stderr: format!("key not found: {}", key.full_name()),
            });
        };

        std::fs::write(out_file, render(name, payload)).map_err(|source| RegistryError::File {
            path: out_file.to_path_buf(),
            source,
        })
    }

    fn import(&self, key_file: &Path) -> Result<(), RegistryError> {
        self.state().imports.push(key_file.to_path_buf());

        let content = std::fs::read_to_string(key_file).map_err(|source| RegistryError::File {
            path: key_file.to_path_buf(),
            source,
        })?;
        let invalid = || RegistryError::CommandFailed {
            command: "memory import".into(),
            code: 1,
            stderr: format!("not a registry export: {}", key_file.display()),
        };
        let (name, payload) = parse_export(&content).ok_or_else(invalid)?;
        let key = RegistryKey::parse(&name).map_err(|_| invalid())?;
        self.insert(&key, payload);
        Ok(())
    }

    fn installed_display_names(&self) -> BTreeSet<String> {
        self.state().installed.clone()
    }
}
