//! Backup and restore commands

use std::path::Path;

use colored::Colorize;
use vault_core::{
    AppReport, ArchiveOutcome, Orchestrator, OutcomeStatus, RestoreTarget, RunEvent, RunOptions,
    RunReport, spawn_run,
};

use crate::context::Session;
use crate::error::{CliError, Result};

/// Run the backup command
pub fn run_backup(session: &Session, apps: &[String], zip: bool) -> Result<()> {
    let options = RunOptions::backup(zip || session.config.compress)
        .with_installed_only(session.config.installed_only);
    execute(session, apps, options)
}

/// Run the restore command
pub fn run_restore(session: &Session, apps: &[String], target: Option<&Path>) -> Result<()> {
    let target = match target {
        Some(dir) if dir.is_relative() => RestoreTarget::CustomRoot(session.work_dir.join(dir)),
        Some(dir) => RestoreTarget::CustomRoot(dir.to_path_buf()),
        None => RestoreTarget::Original,
    };
    let options =
        RunOptions::restore(target).with_installed_only(session.config.installed_only);
    execute(session, apps, options)
}

/// Trim names and drop empty entries from a comma-separated list.
fn clean_apps(apps: &[String]) -> Vec<String> {
    apps.iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn execute(session: &Session, apps: &[String], options: RunOptions) -> Result<()> {
    let apps = clean_apps(apps);
    if apps.is_empty() {
        return Err(CliError::user("No applications given. Use --apps A,B"));
    }

    let catalog = session.load_catalog()?;
    let orchestrator = Orchestrator::new(session.run_context(), catalog);
    println!(
        "{} {} application(s) in {}",
        capitalized(options.mode.name()).bold(),
        apps.len(),
        session.config.layout().display_root().display()
    );

    let handle = spawn_run(orchestrator, apps.clone(), options)?;
    for event in handle.events().iter() {
        match event {
            RunEvent::Progress { completed, total } => {
                let app = completed
                    .checked_sub(1)
                    .and_then(|i| apps.get(i))
                    .map(String::as_str)
                    .unwrap_or_default();
                println!("{} {}", format!("[{completed}/{total}]").dimmed(), app);
            }
            RunEvent::Finished(report) => print_report(&report),
            RunEvent::Log(_) => {}
        }
    }
    handle.wait()?;
    Ok(())
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_report(report: &RunReport) {
    println!();
    for app in &report.apps {
        print_app(app);
    }
    println!();
    println!(
        "{} {} processed, {} skipped, {} failed resource(s).",
        "Done:".green().bold(),
        report.processed(),
        report.skipped(),
        report.failures().count()
    );
}

fn print_app(app: &AppReport) {
    if let Some(reason) = app.skip_reason() {
        println!("  {} {} ({})", "-".yellow(), app.app, reason.to_string().yellow());
        return;
    }
    if !app.data_found {
        println!("  {} {} {}", "-".dimmed(), app.app, "no data".dimmed());
        return;
    }

    let unsupported = app
        .outcomes
        .iter()
        .filter(|o| o.status == OutcomeStatus::Unsupported)
        .count();
    let mut line = format!("{} ok", app.succeeded());
    if app.failed() > 0 {
        line.push_str(&format!(", {} failed", app.failed()).red().to_string());
    }
    if unsupported > 0 {
        line.push_str(&format!(", {unsupported} unsupported"));
    }
    println!("  {} {} ({})", "+".green(), app.app.bold(), line);

    for outcome in &app.outcomes {
        if let Some(error) = outcome.error() {
            println!("      {} {} {}: {}", "x".red(), outcome.kind, outcome.source, error);
        }
    }
    match &app.archive {
        ArchiveOutcome::Created(artifact) => {
            println!("      archive {}", artifact.path.display().to_string().cyan())
        }
        ArchiveOutcome::Failed { error } => {
            println!("      {} archive: {}", "x".red(), error)
        }
        ArchiveOutcome::NotRequested | ArchiveOutcome::NoData => {}
    }
}
