//! Existence checks for every resource kind

use vault_fs::probe;
use vault_meta::ResourceKind;

use crate::context::RunContext;
use crate::registry::registry_key_exists;

/// Side-effect free probes bound to a run context.
#[derive(Debug, Clone, Copy)]
pub struct ResourceProbe<'a> {
    ctx: &'a RunContext,
}

impl<'a> ResourceProbe<'a> {
    pub fn new(ctx: &'a RunContext) -> Self {
        Self { ctx }
    }

    /// File or directory at the expanded path. Gates file and folder capture.
    pub fn path_exists(&self, path: &str) -> bool {
        probe::path_exists(self.ctx.env(), path)
    }

    pub fn file_exists(&self, path: &str) -> bool {
        probe::file_exists(self.ctx.env(), path)
    }

    pub fn folder_exists(&self, path: &str) -> bool {
        probe::folder_exists(self.ctx.env(), path)
    }

    pub fn registry_key_exists(&self, key: &str) -> bool {
        registry_key_exists(self.ctx.registry(), key)
    }

    /// Whether a capture of `entry` should be attempted.
    pub fn should_capture(&self, kind: ResourceKind, entry: &str) -> bool {
        match kind {
            ResourceKind::File | ResourceKind::Folder => self.path_exists(entry),
            ResourceKind::Registry => self.registry_key_exists(entry),
        }
    }

    /// Kind-specific presence, as reported by plugin verification.
    pub fn is_present(&self, kind: ResourceKind, entry: &str) -> bool {
        match kind {
            ResourceKind::File => self.file_exists(entry),
            ResourceKind::Folder => self.folder_exists(entry),
            ResourceKind::Registry => self.registry_key_exists(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;
    use std::sync::Arc;
    use tempfile::TempDir;
    use vault_fs::{BackupLayout, Environment};

    #[test]
    fn capture_gate_accepts_either_kind() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("dir")).unwrap();
        std::fs::write(temp.path().join("file"), "x").unwrap();
        let env = Environment::empty().with_var("ROOT", temp.path().to_string_lossy());
        let ctx = RunContext::new(BackupLayout::new(temp.path().join("Backup")))
            .with_env(env)
            .with_registry(Arc::new(MemoryRegistry::new().with_key(r"HKCU\Software\A", "")));
        let probe = ResourceProbe::new(&ctx);

        assert!(probe.should_capture(ResourceKind::File, "%ROOT%/dir"));
        assert!(probe.should_capture(ResourceKind::Folder, "%ROOT%/file"));
        assert!(!probe.is_present(ResourceKind::File, "%ROOT%/dir"));
        assert!(!probe.is_present(ResourceKind::Folder, "%ROOT%/file"));
        assert!(probe.should_capture(ResourceKind::Registry, r"HKCU\Software\A"));
        assert!(!probe.should_capture(ResourceKind::Registry, r"HKCU\Software\B"));
    }
}
