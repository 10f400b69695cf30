//! Run-level behaviour: skipping, archives, idempotence and catalog merging

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use vault_core::{
    AppStatus, ArchiveOutcome, InstalledApps, MemoryRegistry, Orchestrator, OutcomeStatus,
    RunContext, RunOptions, SkipReason, VaultConfig, summarize_output,
};
use vault_fs::{BackupLayout, Environment};
use vault_meta::{Catalog, ResourceKind, ResourceSpec};
use vault_test_utils::TestVault;

fn orchestrator(vault: &TestVault, registry: Arc<MemoryRegistry>) -> Orchestrator {
    let config = VaultConfig::load(vault.root()).unwrap();
    let catalog = config.catalog_loader().load().unwrap().catalog;
    let ctx = RunContext::new(config.layout())
        .with_env(Environment::from_pairs(vault.env_pairs()))
        .with_registry(registry)
        .with_log(config.log_sink());
    Orchestrator::new(ctx, catalog)
}

#[test]
fn test_unknown_app_between_known_apps() {
    let vault = TestVault::new();
    vault.write_home_file("Known/a.cfg", "a");
    vault.write_home_file("Known2/b.cfg", "b");
    vault.write_plugin(
        "example_known.json",
        json!({
            "Known": {"files": [vault.home_entry("Known/a.cfg")]},
            "Known2": {"files": [vault.home_entry("Known2/b.cfg")]}
        }),
    );

    let report = orchestrator(&vault, Arc::new(MemoryRegistry::new()))
        .run(&["Known", "Unknown", "Known2"], &RunOptions::backup(false))
        .unwrap();

    let names: Vec<&str> = report.apps.iter().map(|a| a.app.as_str()).collect();
    assert_eq!(names, vec!["Known", "Unknown", "Known2"]);
    assert_eq!(
        report.app("Unknown").unwrap().status,
        AppStatus::Skipped(SkipReason::UnknownApplication)
    );
    assert!(vault.backup_root().join("Known/a.cfg").is_file());
    assert!(vault.backup_root().join("Known2/b.cfg").is_file());
    assert!(!vault.backup_root().join("Unknown").exists());
    assert!(vault.log_contents().contains("Unknown"));
}

#[test]
fn test_absent_resources_produce_no_archive() {
    let vault = TestVault::new();
    vault.write_plugin(
        "example_ghost.json",
        json!({"Ghost": {
            "files": [vault.home_entry("Ghost/missing.ini")],
            "folders": [vault.home_entry("Ghost/gone")],
            "registry": ["HKCU\\Software\\Ghost"]
        }}),
    );

    let report = orchestrator(&vault, Arc::new(MemoryRegistry::new()))
        .run(&["Ghost"], &RunOptions::backup(true))
        .unwrap();

    let ghost = report.app("Ghost").unwrap();
    assert!(!ghost.data_found);
    assert_eq!(ghost.archive, ArchiveOutcome::NoData);
    assert!(
        ghost
            .outcomes
            .iter()
            .all(|o| o.status == OutcomeStatus::NotFound)
    );
    assert!(!BackupLayout::new(vault.backup_root()).archive_path("Ghost").exists());
    assert!(vault.log_contents().contains("no data for Ghost"));
}

#[test]
fn test_backup_twice_keeps_identical_output() {
    let vault = TestVault::new();
    vault.write_home_file("Player/settings.xml", "<volume>7</volume>");
    vault.write_home_file("Player/skins/blue/skin.ini", "color=blue");
    vault.write_plugin(
        "example_player.json",
        json!({"Player": {
            "files": [vault.home_entry("Player/settings.xml")],
            "folders": [vault.home_entry("Player/skins")],
            "registry": ["HKCU\\Software\\Player", "HKLM\\Software\\Player"]
        }}),
    );
    let registry = Arc::new(
        MemoryRegistry::new()
            .with_key(r"HKCU\Software\Player", "\"Volume\"=dword:00000007")
            .with_key(r"HKLM\Software\Player", "\"Path\"=\"C:\\\\Player\""),
    );
    let mut engine = orchestrator(&vault, registry);
    let layout = BackupLayout::new(vault.backup_root());

    engine.run(&["Player"], &RunOptions::backup(true)).unwrap();
    let first = summarize_output(&layout, "Player").unwrap().unwrap();
    engine.run(&["Player"], &RunOptions::backup(true)).unwrap();
    let second = summarize_output(&layout, "Player").unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.registry_exports, 2);
    assert_eq!(layout.registry_files("Player").len(), 2);
}

#[test]
fn test_rules_override_plugin_entry() {
    let vault = TestVault::new();
    vault.write_home_file("Old/old.cfg", "old");
    vault.write_home_file("New/new.cfg", "new");
    vault.write_plugin(
        "example_app.json",
        json!({"App": {"files": [vault.home_entry("Old/old.cfg")]}}),
    );
    vault.write_rules(json!({"App": {"files": [vault.home_entry("New/new.cfg")]}}));

    let report = orchestrator(&vault, Arc::new(MemoryRegistry::new()))
        .run(&["App"], &RunOptions::backup(false))
        .unwrap();

    let outcomes: Vec<_> = report.app("App").unwrap().outcomes_of(ResourceKind::File).collect();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].source.ends_with("new.cfg"));
    assert!(vault.backup_root().join("App/new.cfg").is_file());
    assert!(!vault.backup_root().join("App/old.cfg").exists());
}

#[test]
fn test_installed_only_filter() {
    let vault = TestVault::new();
    vault.write_home_file("Steam/config.vdf", "x");
    vault.write_home_file("MyScripts/run.ps1", "y");
    vault.write_home_file("Zoom/zoom.ini", "z");
    vault.write_plugin(
        "example_mixed.json",
        json!({
            "Steam": {"files": [vault.home_entry("Steam/config.vdf")]},
            "Zoom": {"files": [vault.home_entry("Zoom/zoom.ini")]}
        }),
    );
    vault.write_rules(json!({"MyScripts": {"files": [vault.home_entry("MyScripts/run.ps1")]}}));

    let report = orchestrator(&vault, Arc::new(MemoryRegistry::new()))
        .with_installed(InstalledApps::from_names(["Steam"]))
        .run(
            &["Steam", "MyScripts", "Zoom"],
            &RunOptions::backup(false).with_installed_only(true),
        )
        .unwrap();

    assert!(!report.app("Steam").unwrap().is_skipped());
    assert!(!report.app("MyScripts").unwrap().is_skipped());
    assert_eq!(
        report.app("Zoom").unwrap().skip_reason(),
        Some(&SkipReason::NotInstalled)
    );
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Alpha".to_string()),
        Just("Beta".to_string()),
        "[A-Z][a-z]{2,8}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn report_follows_request_order(apps in prop::collection::vec(name_strategy(), 1..6)) {
        let temp = TestVault::new();
        let mut catalog = Catalog::new();
        catalog.insert("Alpha", ResourceSpec::new().with_file("%NOWHERE%/alpha.ini"));
        catalog.insert("Beta", ResourceSpec::new().with_folder("%NOWHERE%/beta"));
        let ctx = RunContext::new(BackupLayout::new(temp.backup_root()))
            .with_env(Environment::empty())
            .with_registry(Arc::new(MemoryRegistry::new()));

        let report = Orchestrator::new(ctx, catalog)
            .run(&apps, &RunOptions::backup(false))
            .unwrap();

        let names: Vec<&str> = report.apps.iter().map(|a| a.app.as_str()).collect();
        let expected: Vec<&str> = apps.iter().map(String::as_str).collect();
        prop_assert_eq!(names, expected);
        for app in &report.apps {
            let known = app.app == "Alpha" || app.app == "Beta";
            prop_assert_eq!(app.is_skipped(), !known);
        }
    }
}
