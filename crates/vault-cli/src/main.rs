//! AppVault CLI
//!
//! Back up and restore application settings described by plugin fragments.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, PluginsAction};
use context::Session;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = cli.command.clone() else {
        println!("{} - application settings backup", "appvault".green().bold());
        println!();
        println!("Run {} for available commands.", "appvault --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let session = Session::load(&cwd, &cli)?;
    execute_command(&session, command)
}

fn execute_command(session: &Session, command: Commands) -> Result<()> {
    match command {
        Commands::Backup { apps, zip } => commands::run_backup(session, &apps, zip),
        Commands::Restore { apps, target } => {
            commands::run_restore(session, &apps, target.as_deref())
        }
        Commands::List { json } => commands::run_list(session, json),
        Commands::Plugins { action } => match action {
            PluginsAction::Install => commands::run_plugins_install(session),
            PluginsAction::Check { name } => commands::run_plugins_check(session, name.as_deref()),
            PluginsAction::Add {
                name,
                files,
                folders,
                registry,
            } => commands::run_plugins_add(session, &name, &files, &folders, &registry),
            PluginsAction::Scan => commands::run_plugins_scan(),
        },
        Commands::Status { apps, json } => commands::run_status(session, &apps, json),
    }
}
