//! Resource declarations - loaded from Plugins/*.json
//!
//! # Example fragment
//!
//! ```json
//! {
//!   "Mozilla Firefox": {
//!     "folders": ["%APPDATA%\\Mozilla\\Firefox\\Profiles"],
//!     "registry": ["HKEY_CURRENT_USER\\Software\\Mozilla"]
//!   }
//! }
//! ```
//!
//! Every field is optional in the source and normalizes to an empty list.

use serde::{Deserialize, Serialize};

/// The resources one application declares, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceSpec {
    /// Individual files, possibly containing environment placeholders
    #[serde(default)]
    pub files: Vec<String>,
    /// Directory trees, possibly containing environment placeholders
    #[serde(default)]
    pub folders: Vec<String>,
    /// Registry keys in `HIVE\subkey` form
    #[serde(default)]
    pub registry: Vec<String>,
}

impl ResourceSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn with_folder(mut self, path: impl Into<String>) -> Self {
        self.folders.push(path.into());
        self
    }

    pub fn with_registry(mut self, key: impl Into<String>) -> Self {
        self.registry.push(key.into());
        self
    }

    /// True when no resource of any kind is declared.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty() && self.registry.is_empty()
    }

    /// Total number of declared resources.
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len() + self.registry.len()
    }

    /// Declared entries of one kind.
    pub fn entries(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::File => &self.files,
            ResourceKind::Folder => &self.folders,
            ResourceKind::Registry => &self.registry,
        }
    }

    /// All declared entries tagged with their kind, files first.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &str)> {
        ResourceKind::ALL
            .into_iter()
            .flat_map(move |kind| self.entries(kind).iter().map(move |e| (kind, e.as_str())))
    }
}

/// Kind of a declared resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    File,
    Folder,
    Registry,
}

impl ResourceKind {
    /// Processing order used by backup and restore.
    pub const ALL: [ResourceKind; 3] = [Self::File, Self::Folder, Self::Registry];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Registry => "registry",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_normalize_to_empty() {
        let spec: ResourceSpec = serde_json::from_str(r#"{"folders": ["%APPDATA%\\Zoom"]}"#).unwrap();
        assert!(spec.files.is_empty());
        assert_eq!(spec.folders, vec![r"%APPDATA%\Zoom".to_string()]);
        assert!(spec.registry.is_empty());
    }

    #[test]
    fn serializes_all_fields() {
        let json = serde_json::to_value(ResourceSpec::new().with_file("a")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"files": ["a"], "folders": [], "registry": []})
        );
    }

    #[test]
    fn iter_preserves_kind_then_declaration_order() {
        let spec = ResourceSpec::new()
            .with_registry("HKEY_CURRENT_USER\\Software\\X")
            .with_folder("f1")
            .with_file("a")
            .with_file("b");

        let items: Vec<_> = spec.iter().collect();
        assert_eq!(
            items,
            vec![
                (ResourceKind::File, "a"),
                (ResourceKind::File, "b"),
                (ResourceKind::Folder, "f1"),
                (ResourceKind::Registry, "HKEY_CURRENT_USER\\Software\\X"),
            ]
        );
        assert_eq!(spec.len(), 4);
    }

    #[test]
    fn empty_spec() {
        assert!(ResourceSpec::new().is_empty());
        assert!(!ResourceSpec::new().with_folder("x").is_empty());
    }
}
