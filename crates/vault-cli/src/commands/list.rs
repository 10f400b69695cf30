//! List catalog applications

use colored::Colorize;
use vault_core::{InstalledApps, platform_backend};
use vault_meta::{Catalog, ResourceSpec};

use crate::context::Session;
use crate::error::Result;

/// Run the list command
pub fn run_list(session: &Session, json: bool) -> Result<()> {
    let catalog = session.load_catalog()?;
    let catalog = if session.config.installed_only {
        let installed = InstalledApps::detect(platform_backend().as_ref());
        filter_installed(&catalog, &installed)
    } else {
        catalog
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("{}", "Applications".bold());
    println!();
    for (name, spec) in catalog.iter() {
        println!("  {:<28} {}", name.green(), describe(spec).dimmed());
    }
    println!();
    println!("{} {} application(s).", "Total:".dimmed(), catalog.len());
    Ok(())
}

fn filter_installed(catalog: &Catalog, installed: &InstalledApps) -> Catalog {
    catalog
        .iter()
        .filter(|(name, _)| installed.allows(name))
        .map(|(name, spec)| (name.to_string(), spec.clone()))
        .collect()
}

fn describe(spec: &ResourceSpec) -> String {
    format!(
        "{} file(s), {} folder(s), {} registry key(s)",
        spec.files.len(),
        spec.folders.len(),
        spec.registry.len()
    )
}
