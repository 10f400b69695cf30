//! Application catalog for AppVault.
//!
//! The catalog maps an application display name to the files, folders and
//! registry keys that hold its settings. It is assembled from plugin
//! fragments (`Plugins/*.json`) followed by the user's override file, with
//! later entries replacing earlier ones wholesale.

pub mod builtins;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod plugins;
pub mod scan;
pub mod schema;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use loader::{CatalogLoader, LoadReport, LoadedCatalog, SkippedFragment};
pub use plugins::{PluginStore, plugin_file_name};
pub use scan::ConfigScanner;
pub use schema::{ResourceKind, ResourceSpec};
