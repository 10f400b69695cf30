//! Merged application catalog

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::ResourceSpec;

/// Mapping from application display name to its resources.
///
/// A catalog fragment on disk has exactly this shape, so fragments and the
/// merged result share one type. Names iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, ResourceSpec>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one application.
    pub fn insert(&mut self, name: impl Into<String>, spec: ResourceSpec) -> Option<ResourceSpec> {
        self.entries.insert(name.into(), spec)
    }

    /// Merge `fragment` on top of this catalog.
    ///
    /// Entries of the fragment replace same-named entries wholesale; lists
    /// are never concatenated.
    pub fn merge(&mut self, fragment: Catalog) {
        for (name, spec) in fragment.entries {
            if self.entries.insert(name.clone(), spec).is_some() {
                tracing::debug!(app = %name, "catalog entry overridden");
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResourceSpec> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Application names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceSpec)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ResourceSpec)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, ResourceSpec)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn override_replaces_not_appends() {
        let mut base: Catalog = serde_json::from_str(r#"{"App": {"files": ["a"]}}"#).unwrap();
        let over: Catalog = serde_json::from_str(r#"{"App": {"files": ["b"]}}"#).unwrap();

        base.merge(over);

        assert_eq!(base.get("App").unwrap().files, vec!["b".to_string()]);
    }

    #[test]
    fn override_replaces_whole_entry() {
        let mut base: Catalog =
            serde_json::from_str(r#"{"App": {"files": ["a"], "registry": ["HKCU\\X"]}}"#).unwrap();
        let over: Catalog = serde_json::from_str(r#"{"App": {"folders": ["d"]}}"#).unwrap();

        base.merge(over);

        let spec = base.get("App").unwrap();
        assert!(spec.files.is_empty());
        assert!(spec.registry.is_empty());
        assert_eq!(spec.folders, vec!["d".to_string()]);
    }

    #[test]
    fn merge_keeps_unrelated_entries() {
        let mut base = Catalog::new();
        base.insert("Zoom", ResourceSpec::new().with_folder("z"));
        let mut over = Catalog::new();
        over.insert("Git", ResourceSpec::new().with_registry("HKCU\\Software\\GitForWindows"));

        base.merge(over);

        assert_eq!(base.names(), vec!["Git", "Zoom"]);
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn fragment_round_trips_as_plain_map() {
        let mut catalog = Catalog::new();
        catalog.insert("Zoom", ResourceSpec::new().with_folder("%APPDATA%\\Zoom"));
        let json = serde_json::to_value(&catalog).unwrap();
        assert!(json.get("Zoom").is_some());
    }
}
