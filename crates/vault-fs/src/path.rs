//! Separator-agnostic path handling
//!
//! Catalog entries are written with Windows separators but the engine must
//! compute base names the same way on every platform.

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Backslashes from catalog entries are converted on construction so that
/// `file_name` agrees across platforms. Conversion back to a
/// native path happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(self.inner.replace('/', "\\"))
        } else {
            PathBuf::from(&self.inner)
        }
    }

    /// Get the final component, ignoring trailing separators.
    ///
    /// `C:\Users\me\AppData\Roaming\Code\User\` yields `User`.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

/// Validate that a name is usable as a single directory or file component.
///
/// Application names become `<backupRoot>/<name>/`, so they must not be
/// empty, contain separators, or resolve to `.`/`..`.
///
/// Returns a human-readable message on failure, prefixed with `label`.
pub fn validate_path_identifier(name: &str, label: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{label} must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(format!("{label} '{name}' is not a valid name"));
    }
    if name.contains(['/', '\\']) {
        return Err(format!("{label} '{name}' must not contain path separators"));
    }
    if name.contains('\0') {
        return Err(format!("{label} must not contain NUL bytes"));
    }
    if cfg!(windows) && name.contains([':', '*', '?', '"', '<', '>', '|']) {
        return Err(format!("{label} '{name}' contains characters reserved on Windows"));
    }
    Ok(())
}
