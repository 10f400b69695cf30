//! Backup and restore orchestration for AppVault
//!
//! This crate turns a catalog of per-application resources into captured
//! output locations and back:
//!
//! - **Capture engine**: copy files and folders, export registry keys
//! - **Restore engine**: copy captures back to their original location or a
//!   custom root, re-import registry exports
//! - **Archiver**: zip an output location after a backup
//! - **Orchestrator**: loop over requested applications with per-resource
//!   fault isolation, progress events and a run lock
//!
//! # Architecture
//!
//! ```text
//!                  vault-cli
//!                      |
//!                 vault-core
//!                      |
//!            +---------+---------+
//!            |                   |
//!       vault-meta           vault-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vault_core::{Orchestrator, RunContext, RunOptions, VaultConfig};
//!
//! fn backup(work_dir: &std::path::Path) -> vault_core::Result<()> {
//!     let config = VaultConfig::load(work_dir)?;
//!     let catalog = config.catalog_loader().load()?.catalog;
//!     let ctx = RunContext::new(config.layout()).with_log(config.log_sink());
//!     let report = Orchestrator::new(ctx, catalog).run(&["Zoom"], &RunOptions::backup(true))?;
//!     println!("{} processed", report.processed());
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod capture;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod installed;
pub mod lock;
pub mod log_sink;
pub mod orchestrator;
pub mod outcome;
pub mod probe;
pub mod registry;
pub mod restore;
pub mod status;
pub mod verify;
pub mod worker;

pub use archive::{ArchiveArtifact, ArchiveOutcome, compress};
pub use capture::{capture_file, capture_folder, capture_registry_key};
pub use config::VaultConfig;
pub use context::RunContext;
pub use error::{Error, Result};
pub use events::{EventSender, RunEvent};
pub use installed::InstalledApps;
pub use lock::RunLock;
pub use log_sink::{LogLevel, LogRecord, LogSink};
pub use orchestrator::{
    AppReport, AppStatus, Mode, Orchestrator, RunOptions, RunReport, RunState, SkipReason,
};
pub use outcome::{OutcomeStatus, ResourceOutcome};
pub use probe::ResourceProbe;
pub use registry::{
    MemoryRegistry, RegTool, RegistryBackend, RegistryError, RegistryKey, UnsupportedRegistry,
    platform_backend,
};
pub use restore::{RestoreTarget, restore_file, restore_folder, restore_registry_key};
pub use status::{OutputSummary, backed_up_apps, summarize_output};
pub use verify::{CheckSummary, EntryCheck, PluginCheck, check_catalog, check_plugin};
pub use worker::{RunHandle, spawn_run};
