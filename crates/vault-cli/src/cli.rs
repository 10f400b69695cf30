//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AppVault - back up and restore application settings
#[derive(Parser, Debug)]
#[command(name = "appvault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backup root (default: Backup/ in the working directory)
    #[arg(long, global = true, env = "APPVAULT_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory of plugin fragments (default: Plugins/)
    #[arg(long, global = true)]
    pub plugins: Option<PathBuf>,

    /// User override catalog (default: Config/custom_rules.json)
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Directory for backup.log (default: Logs/)
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Only process applications detected as installed
    #[arg(long, global = true)]
    pub installed_only: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Capture settings of the listed applications
    ///
    /// Examples:
    ///   appvault backup --apps "Google Chrome,Zoom"
    ///   appvault backup --apps Steam --zip
    Backup {
        /// Comma-separated application names
        #[arg(long, value_delimiter = ',', required = true)]
        apps: Vec<String>,

        /// Zip each application's output after capture
        #[arg(long)]
        zip: bool,
    },

    /// Put captured settings back
    ///
    /// Without --target, files and folders go back to their original
    /// locations. Registry exports are always imported into their own keys.
    Restore {
        /// Comma-separated application names
        #[arg(long, value_delimiter = ',', required = true)]
        apps: Vec<String>,

        /// Restore files and folders into this directory instead
        #[arg(long)]
        target: Option<PathBuf>,
    },

    /// List applications in the catalog
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Manage plugin fragments
    Plugins {
        #[command(subcommand)]
        action: PluginsAction,
    },

    /// Show what the backup root holds per application
    Status {
        /// Comma-separated application names (default: all backed up)
        #[arg(long, value_delimiter = ',')]
        apps: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Plugin actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PluginsAction {
    /// Write the built-in plugin set to the plugins directory
    Install,

    /// Check which declared paths exist on this machine
    Check {
        /// Plugin to check (default: all, with a summary)
        name: Option<String>,
    },

    /// Create or replace a plugin
    Add {
        /// Application name
        name: String,

        /// Settings file (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,

        /// Settings folder (repeatable)
        #[arg(long = "folder")]
        folders: Vec<String>,

        /// Registry key (repeatable)
        #[arg(long = "registry")]
        registry: Vec<String>,
    },

    /// List candidate configuration files under the user profile
    Scan,
}
