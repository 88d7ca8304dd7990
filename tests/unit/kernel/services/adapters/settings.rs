use super::*;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = load_settings(&dir.path().join("absent.json")).unwrap();
    assert_eq!(settings, FolderSettings::default());
}

#[test]
fn reads_overrides_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "label_reassert_delay_ms": 5, "intercept_auto_folders": false }"#,
    )
    .unwrap();

    let settings = load_settings(&path).unwrap();
    assert_eq!(settings.label_reassert_delay_ms, 5);
    assert!(!settings.intercept_auto_folders);
    assert_eq!(settings.default_label, "New Folder");
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_settings(&path), Err(SettingsError::Parse(_))));
    assert_eq!(load_settings_or_default(&path), FolderSettings::default());
}
