//! Status command: per-application summary of the backup root

use colored::Colorize;
use vault_core::{OutputSummary, backed_up_apps, summarize_output};

use crate::context::Session;
use crate::error::Result;

/// Run the status command
pub fn run_status(session: &Session, apps: &[String], json: bool) -> Result<()> {
    let layout = session.config.layout();
    let apps: Vec<String> = if apps.is_empty() {
        backed_up_apps(&layout)?
    } else {
        apps.iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    };

    let mut summaries: Vec<OutputSummary> = Vec::new();
    let mut missing = Vec::new();
    for app in &apps {
        match summarize_output(&layout, app)? {
            Some(summary) => summaries.push(summary),
            None => missing.push(app.as_str()),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Backup root:".bold(),
        layout.display_root().display()
    );
    println!();
    for summary in &summaries {
        let archive = if summary.archive.is_some() { "zip" } else { "-" };
        println!(
            "  {:<28} {:>5} file(s) {:>10} bytes  {:<3}  {}",
            summary.app.green(),
            summary.files,
            summary.bytes,
            archive,
            short_checksum(&summary.checksum).dimmed()
        );
    }
    for app in missing {
        println!("  {:<28} {}", app.yellow(), "not backed up".dimmed());
    }
    Ok(())
}

/// First 12 hex digits of a `sha256:` checksum.
fn short_checksum(checksum: &str) -> &str {
    let hex = checksum.strip_prefix("sha256:").unwrap_or(checksum);
    hex.get(..12).unwrap_or(hex)
}
