//! Plugin commands: install, check, add, scan

use colored::Colorize;
use vault_core::{PluginCheck, ResourceProbe, check_catalog, check_plugin};
use vault_fs::Environment;
use vault_meta::{ConfigScanner, PluginStore, ResourceSpec};

use crate::context::Session;
use crate::error::{CliError, Result};

/// Run the plugins install command
pub fn run_plugins_install(session: &Session) -> Result<()> {
    let store = PluginStore::new(&session.config.plugins_dir);
    let written = store.install_builtins()?;
    println!(
        "{} Installed {} plugin(s) into {}",
        "OK".green().bold(),
        written.len(),
        store.dir().display()
    );
    Ok(())
}

/// Run the plugins check command
pub fn run_plugins_check(session: &Session, name: Option<&str>) -> Result<()> {
    let catalog = session.load_catalog()?;
    let ctx = session.run_context();
    let probe = ResourceProbe::new(&ctx);

    match name {
        Some(name) => {
            let spec = catalog
                .get(name)
                .ok_or_else(|| CliError::user(format!("Plugin not found: {name}")))?;
            print_check(&check_plugin(&probe, name, spec));
        }
        None => {
            let (checks, summary) = check_catalog(&probe, &catalog);
            for check in &checks {
                print_check(check);
            }
            println!();
            println!(
                "Checked {} plugin(s): {} ok, {} missing, {} empty",
                summary.total,
                summary.ok.to_string().green(),
                summary.warnings.to_string().yellow(),
                summary.errors.to_string().red()
            );
        }
    }
    Ok(())
}

fn print_check(check: &PluginCheck) {
    println!("{}", check.name.bold());
    if check.is_empty() {
        println!("  {} plugin declares no paths", "empty".red());
        return;
    }
    for entry in &check.entries {
        let mark = if entry.present {
            "ok     ".green()
        } else {
            "missing".yellow()
        };
        println!("  {} {:<8} {}", mark, entry.kind.as_str(), entry.path);
    }
}

/// Run the plugins add command
pub fn run_plugins_add(
    session: &Session,
    name: &str,
    files: &[String],
    folders: &[String],
    registry: &[String],
) -> Result<()> {
    let spec = ResourceSpec {
        files: files.to_vec(),
        folders: folders.to_vec(),
        registry: registry.to_vec(),
    };
    let store = PluginStore::new(&session.config.plugins_dir);
    let path = store.save(name, &spec)?;
    println!("{} Saved {}", "OK".green().bold(), path.display());

    // Reload so overrides from the rules file are reflected in the check.
    let catalog = session.load_catalog()?;
    if let Some(spec) = catalog.get(name) {
        let ctx = session.run_context();
        print_check(&check_plugin(&ResourceProbe::new(&ctx), name, spec));
    }
    Ok(())
}

/// Run the plugins scan command
pub fn run_plugins_scan() -> Result<()> {
    let env = Environment::from_process();
    let found = ConfigScanner::new().scan(&env);
    for path in &found {
        println!("{}", path.display());
    }
    eprintln!(
        "{} {} candidate file(s). Add them with {}",
        "Found".dimmed(),
        found.len(),
        "appvault plugins add NAME --file PATH".cyan()
    );
    Ok(())
}
