//! Command implementations for vault-cli

pub mod list;
pub mod plugins;
pub mod run;
pub mod status;

pub use list::run_list;
pub use plugins::{run_plugins_add, run_plugins_check, run_plugins_install, run_plugins_scan};
pub use run::{run_backup, run_restore};
pub use status::run_status;
