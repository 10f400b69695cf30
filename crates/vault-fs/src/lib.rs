//! Filesystem layer for AppVault
//!
//! Provides environment-variable path expansion, side-effect free existence
//! probes, merge-style copying, atomic I/O, and the on-disk backup layout.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod copy;
pub mod error;
pub mod expand;
pub mod io;
pub mod layout;
pub mod path;
pub mod probe;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::VaultPath;
pub use copy::{CopyStats, copy_file, copy_tree};
pub use error::{Error, Result};
pub use expand::Environment;
pub use layout::BackupLayout;
pub use path::{NormalizedPath, validate_path_identifier};
