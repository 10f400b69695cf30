//! Installed-application filter

use std::collections::BTreeSet;

use crate::registry::RegistryBackend;

/// Names starting with this prefix are user-defined entries and are never
/// filtered out.
pub const USER_DEFINED_PREFIX: &str = "My";

/// Display names of applications detected as installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledApps {
    names: BTreeSet<String>,
}

impl InstalledApps {
    /// Ask the registry backend. Empty where no registry exists.
    pub fn detect(registry: &dyn RegistryBackend) -> Self {
        let names = registry.installed_display_names();
        tracing::debug!(backend = registry.name(), count = names.len(), "Detected installed applications");
        Self { names }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, app: &str) -> bool {
        self.names.contains(app)
    }

    /// Whether an installed-only run may process `app`.
    pub fn allows(&self, app: &str) -> bool {
        app.starts_with(USER_DEFINED_PREFIX) || self.contains(app)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
