use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use vault_fs::{ConfigFormat, ConfigStore, Error};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Settings {
    backup_root: String,
    compress: bool,
}

fn sample() -> Settings {
    Settings {
        backup_root: "Backup".into(),
        compress: true,
    }
}

#[test]
fn save_and_load_each_format() {
    let temp = assert_fs::TempDir::new().unwrap();
    let store = ConfigStore::new();

    for name in ["settings.toml", "settings.json", "settings.yaml"] {
        let file = temp.child(name);
        store.save(file.path(), &sample()).unwrap();
        file.assert(predicate::path::exists());

        let loaded: Settings = store.load(file.path()).unwrap();
        assert_eq!(loaded, sample());
    }
}

#[test]
fn json_with_bom_is_accepted() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("rules.json");
    file.write_str("\u{feff}{\"backup_root\": \"B\", \"compress\": false}")
        .unwrap();

    let loaded: Settings = ConfigStore::new().load(file.path()).unwrap();
    assert_eq!(loaded.backup_root, "B");
}

#[test]
fn malformed_json_reports_path_and_format() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("broken.json");
    file.write_str("{ not json").unwrap();

    let err = ConfigStore::new().load::<Settings>(file.path()).unwrap_err();
    match err {
        Error::ConfigParse { path, format, .. } => {
            assert_eq!(path, file.path());
            assert_eq!(format, "JSON");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_optional_missing_is_none() {
    let temp = assert_fs::TempDir::new().unwrap();
    let loaded: Option<Settings> = ConfigStore::new()
        .load_optional(&temp.path().join("absent.toml"))
        .unwrap();
    assert!(loaded.is_none());
}

#[test]
fn unsupported_extension() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("settings.ini");
    file.write_str("x=1").unwrap();

    let err = ConfigStore::new().load::<Settings>(file.path()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
    assert!(ConfigFormat::detect(file.path()).is_err());
}
