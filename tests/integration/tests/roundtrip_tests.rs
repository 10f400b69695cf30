//! Backup then restore across the whole engine

use std::fs;
use std::io::Read;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use vault_core::{
    ArchiveOutcome, MemoryRegistry, Orchestrator, RestoreTarget, RunContext, RunOptions,
    VaultConfig,
};
use vault_fs::Environment;
use vault_fs::checksum::compute_tree_checksum;
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

fn browser_vault() -> TestVault {
    let vault = TestVault::new();
    vault.write_home_file("Browser/prefs.js", "user_pref(\"a\", 1);");
    vault.write_home_file("Browser/Profile/bookmarks.json", "[1,2,3]");
    vault.write_home_file("Browser/Profile/cache/blob.bin", "\u{1}\u{2}\u{3}");
    vault.create_home_dir("Browser/Profile/empty");
    vault.write_plugin(
        "example_browser.json",
        json!({"Browser": {
            "files": [vault.home_entry("Browser/prefs.js")],
            "folders": [vault.home_entry("Browser/Profile")],
            "registry": ["HKCU\\Software\\Browser"]
        }}),
    );
    vault
}

#[test]
fn test_restore_reproduces_captured_tree() {
    let vault = browser_vault();
    let registry =
        Arc::new(MemoryRegistry::new().with_key(r"HKCU\Software\Browser", "\"Theme\"=\"dark\""));
    let before = compute_tree_checksum(&vault.home().join("Browser/Profile")).unwrap();

    let mut engine = orchestrator(&vault, registry.clone());
    engine.run(&["Browser"], &RunOptions::backup(false)).unwrap();

    fs::remove_dir_all(vault.home().join("Browser")).unwrap();
    assert!(registry.remove_key(r"HKCU\Software\Browser"));

    let report = engine
        .run(&["Browser"], &RunOptions::restore(RestoreTarget::Original))
        .unwrap();

    assert_eq!(report.app("Browser").unwrap().failed(), 0);
    vault.assert_file_content(&vault.home().join("Browser/prefs.js"), "user_pref(\"a\", 1);");
    let after = compute_tree_checksum(&vault.home().join("Browser/Profile")).unwrap();
    assert_eq!(before, after);
    assert!(vault.home().join("Browser/Profile/empty").is_dir());
    assert_eq!(
        registry.payload(r"HKCU\Software\Browser").as_deref(),
        Some("\"Theme\"=\"dark\"")
    );
}

#[test]
fn test_restore_to_custom_root_keeps_base_names() {
    let vault = browser_vault();
    let registry = Arc::new(MemoryRegistry::new());
    let mut engine = orchestrator(&vault, registry);
    engine.run(&["Browser"], &RunOptions::backup(false)).unwrap();

    let target = vault.root().join("Elsewhere");
    engine
        .run(&["Browser"], &RunOptions::restore(RestoreTarget::CustomRoot(target.clone())))
        .unwrap();

    vault.assert_file_content(&target.join("prefs.js"), "user_pref(\"a\", 1);");
    vault.assert_file_content(&target.join("Profile/bookmarks.json"), "[1,2,3]");
}

#[test]
fn test_archive_mirrors_output_location() {
    let vault = browser_vault();
    let registry =
        Arc::new(MemoryRegistry::new().with_key(r"HKCU\Software\Browser", "\"Theme\"=\"dark\""));

    let report = orchestrator(&vault, registry)
        .run(&["Browser"], &RunOptions::backup(true))
        .unwrap();

    let ArchiveOutcome::Created(artifact) = &report.app("Browser").unwrap().archive else {
        panic!("archive was not created");
    };
    let mut archive = zip::ZipArchive::new(fs::File::open(&artifact.path).unwrap()).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.contains(&"prefs.js".to_string()));
    assert!(names.contains(&"Profile/bookmarks.json".to_string()));
    assert!(names.contains(&"Browser_reg.reg".to_string()));

    let mut content = String::new();
    archive
        .by_name("Profile/bookmarks.json")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "[1,2,3]");
}
