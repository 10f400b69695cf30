//! Per-invocation session: settings plus command-line overrides

use std::path::{Path, PathBuf};

use colored::Colorize;
use vault_core::{RunContext, VaultConfig};
use vault_meta::{Catalog, LoadedCatalog};

use crate::cli::Cli;
use crate::error::Result;

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    pub work_dir: PathBuf,
    pub config: VaultConfig,
}

impl Session {
    /// Load settings for `work_dir` and apply the global flags of `cli`.
    pub fn load(work_dir: &Path, cli: &Cli) -> Result<Self> {
        let mut config = VaultConfig::load(work_dir)?;
        let absolute = |p: &PathBuf| {
            if p.is_relative() {
                work_dir.join(p)
            } else {
                p.clone()
            }
        };
        if let Some(root) = &cli.root {
            config.backup_root = absolute(root);
        }
        if let Some(plugins) = &cli.plugins {
            config.plugins_dir = absolute(plugins);
        }
        if let Some(rules) = &cli.rules {
            config.rules_file = absolute(rules);
        }
        if let Some(log) = &cli.log {
            config.log_dir = absolute(log);
        }
        if cli.installed_only {
            config.installed_only = true;
        }
        config.validate()?;
        tracing::debug!(?config, "Session settings");

        Ok(Self {
            work_dir: work_dir.to_path_buf(),
            config,
        })
    }

    /// Load the catalog, reporting skipped fragments as warnings.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let LoadedCatalog { catalog, report } = self.config.catalog_loader().load()?;
        for skipped in &report.skipped {
            eprintln!(
                "{} skipped {}: {}",
                "warning:".yellow().bold(),
                skipped.path.display(),
                skipped.reason
            );
        }
        Ok(catalog)
    }

    /// Run context writing to the configured action log.
    pub fn run_context(&self) -> RunContext {
        RunContext::new(self.config.layout()).with_log(self.config.log_sink())
    }
}
