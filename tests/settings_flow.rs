use std::collections::BTreeMap;
use std::fs;

use deskkit::app::services::{editor, logging, settings_store};
use deskkit::app::{AppError, AppProfile, Config, FieldKey, FieldValue, ThemeDescriptor};

#[test]
fn fresh_environment_creates_default_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config/config.ini");
    assert!(!path.exists());

    let config = Config::load(&path);

    let text = fs::read_to_string(&path).unwrap();
    for line in [
        "start_maximized = True",
        "screen_width = 800",
        "screen_height = 600",
        "log_file = logs/app.log",
        "max_bytes = 5242880",
        "backup_count = 3",
        "level = INFO",
    ] {
        assert!(text.contains(line), "missing '{line}' in:\n{text}");
    }
    assert_eq!(config.get("APP", "screen_width", "0"), "800");
    assert!(!config.is_module_enabled("nonexistent"));
}

#[test]
fn edit_commit_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    let mut config = Config::load(&path);

    let mut edits = BTreeMap::new();
    edits.insert(FieldKey::new("APP", "start_maximized"), FieldValue::Bool(false));
    edits.insert(FieldKey::new("APP", "screen_width"), FieldValue::from("1280"));
    edits.insert(FieldKey::new("LOGGING", "level"), FieldValue::from("debug"));

    let doc = editor::commit(&edits, config.document()).unwrap();
    config.replace_document(doc);
    config.save().unwrap();

    let reloaded = Config::load(&path);
    assert!(!reloaded.get_bool("APP", "start_maximized", true));
    assert_eq!(reloaded.get_int("APP", "screen_width", 0), 1280);

    let resolved = logging::resolve(reloaded.document(), &reloaded.profile().logging);
    assert_eq!(resolved.level, "DEBUG");
}

#[test]
fn failed_commit_leaves_saved_file_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    let config = Config::load(&path);
    let before = fs::read(&path).unwrap();

    let mut edits = BTreeMap::new();
    edits.insert(FieldKey::new("APP", "screen_width"), FieldValue::from("1024"));
    edits.insert(FieldKey::new("APP", "screen_height"), FieldValue::from("tall"));
    edits.insert(FieldKey::new("APP", "dark_mode"), FieldValue::Bool(true));
    edits.insert(FieldKey::new("LOGGING", "max_bytes"), FieldValue::from("1000"));
    edits.insert(FieldKey::new("LOGGING", "backup_count"), FieldValue::from("2"));
    edits.insert(FieldKey::new("LOGGING", "level"), FieldValue::from("ERROR"));

    let err = editor::commit(&edits, config.document()).unwrap_err();
    assert!(matches!(err, AppError::InvalidFieldValue { ref key, .. } if key == "screen_height"));

    config.save().unwrap();
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn save_of_load_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(&path, "[LOGGING]\nLEVEL=warn\n\n\n[APP]\nscreen_width:640\n").unwrap();
    let profile = AppProfile::default();

    settings_store::save(&path, &settings_store::load(&path, &profile)).unwrap();
    let first = fs::read(&path).unwrap();
    settings_store::save(&path, &settings_store::load(&path, &profile)).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn single_role_theme_reports_six_missing() {
    let err = ThemeDescriptor::validate(br##"{"window_background":"#000"}"##).unwrap_err();
    let AppError::IncompleteTheme { missing } = err else {
        panic!("expected IncompleteTheme");
    };
    assert_eq!(missing.len(), 6);
    assert!(!missing.iter().any(|m| m == "window_background"));
}

#[test]
fn profile_edits_persist_as_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    let mut config = Config::load(&path);

    let mut edits = BTreeMap::new();
    edits.insert(FieldKey::new("ABOUT", "name"), FieldValue::from("Renamed App"));
    edits.insert(FieldKey::new("MODULES", "toolbar"), FieldValue::Bool(false));
    let doc = editor::commit(&edits, &config.profile().to_document()).unwrap();
    let updated = config.profile().apply_document(&doc).unwrap();
    config.replace_profile(updated);
    config.save_profile().unwrap();

    let reloaded = Config::load(&path);
    assert_eq!(reloaded.get_about_info("name"), "Renamed App");
    assert!(!reloaded.is_module_enabled("toolbar"));
    assert!(reloaded.is_module_enabled("menu"));
    assert_eq!(reloaded.get_about_info("nope"), "Unknown");
}
