//! Plugin verification: which declared resources exist on this machine

use serde::Serialize;
use vault_meta::{Catalog, ResourceKind, ResourceSpec};

use crate::probe::ResourceProbe;

/// Presence of one declared entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCheck {
    pub kind: ResourceKind,
    pub path: String,
    pub present: bool,
}

/// Check report for a single plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginCheck {
    pub name: String,
    pub entries: Vec<EntryCheck>,
}

impl PluginCheck {
    /// A plugin that declares no paths at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn present(&self) -> usize {
        self.entries.iter().filter(|e| e.present).count()
    }

    pub fn missing(&self) -> usize {
        self.entries.iter().filter(|e| !e.present).count()
    }
}

/// Totals over a set of plugin checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Plugins checked
    pub total: usize,
    /// Entries found
    pub ok: usize,
    /// Entries missing
    pub warnings: usize,
    /// Plugins declaring nothing
    pub errors: usize,
}

/// Check every entry of `spec` with the kind-specific predicates.
pub fn check_plugin(probe: &ResourceProbe<'_>, name: &str, spec: &ResourceSpec) -> PluginCheck {
    let entries = spec
        .iter()
        .map(|(kind, path)| EntryCheck {
            kind,
            path: path.to_string(),
            present: probe.is_present(kind, path),
        })
        .collect();
    PluginCheck {
        name: name.to_string(),
        entries,
    }
}

/// Check all plugins of `catalog`, sorted by name.
pub fn check_catalog(probe: &ResourceProbe<'_>, catalog: &Catalog) -> (Vec<PluginCheck>, CheckSummary) {
    let mut summary = CheckSummary::default();
    let mut checks = Vec::with_capacity(catalog.len());
    for (name, spec) in catalog.iter() {
        let check = check_plugin(probe, name, spec);
        summary.total += 1;
        if check.is_empty() {
            summary.errors += 1;
        } else {
            summary.ok += check.present();
            summary.warnings += check.missing();
        }
        checks.push(check);
    }
    (checks, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunContext;
    use crate::registry::MemoryRegistry;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::TempDir;
    use vault_fs::{BackupLayout, Environment};

    #[test]
    fn summary_counts() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("dir")).unwrap();
        std::fs::write(temp.path().join("file.ini"), "").unwrap();
        let ctx = RunContext::new(BackupLayout::new(temp.path().join("Backup")))
            .with_env(Environment::empty().with_var("T", temp.path().to_string_lossy()))
            .with_registry(Arc::new(MemoryRegistry::new().with_key(r"HKCU\Software\A", "")));
        let probe = ResourceProbe::new(&ctx);

        let mut catalog = Catalog::new();
        catalog.insert(
            "A",
            ResourceSpec::new()
                .with_file("%T%/file.ini")
                .with_file("%T%/dir")
                .with_folder("%T%/dir")
                .with_registry(r"HKCU\Software\A")
                .with_registry(r"HKCU\Software\Missing"),
        );
        catalog.insert("Empty", ResourceSpec::new());

        let (checks, summary) = check_catalog(&probe, &catalog);

        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].missing(), 2);
        assert!(checks[1].is_empty());
        assert_eq!(
            summary,
            CheckSummary {
                total: 2,
                ok: 3,
                warnings: 2,
                errors: 1
            }
        );
    }
}
