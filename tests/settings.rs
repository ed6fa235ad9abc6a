use std::fs;

use strata::persist::PersistenceMode;
use strata::settings::Settings;

#[test]
fn settings_are_read_from_a_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strata.toml");
    fs::write(&path, "database = \"tgis.db\"\nlog_filter = \"strata=debug\"\n").unwrap();

    let settings = Settings::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(settings.log_filter, "strata=debug");
    assert_eq!(settings.persistence_mode(), PersistenceMode::File("tgis.db".to_string()));
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let settings = Settings::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(settings.log_filter, "info");
    assert_eq!(settings.persistence_mode(), PersistenceMode::InMemory);
}

#[test]
fn a_named_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(Settings::load(Some(path.to_str().unwrap())).is_err());
}
