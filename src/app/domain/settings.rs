use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::app::domain::document::SettingsDocument;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::fs::write_atomic;

pub const SECTION_ABOUT: &str = "ABOUT";
pub const SECTION_MODULES: &str = "MODULES";
pub const SECTION_APP: &str = "APP";
pub const SECTION_LOGGING: &str = "LOGGING";

/// Descriptive record shown in the window title and About dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutInfo {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_website")]
    pub website: String,

    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_name() -> String {
    "Deskkit Pro".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_author() -> String {
    "Your Name".to_string()
}

fn default_website() -> String {
    "https://www.yourwebsite.com".to_string()
}

fn default_icon() -> String {
    "resources/icons/app_icon.png".to_string()
}

impl Default for AboutInfo {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            author: default_author(),
            website: default_website(),
            icon: default_icon(),
        }
    }
}

impl AboutInfo {
    pub const KEYS: [&'static str; 5] = ["name", "version", "author", "website", "icon"];

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "version" => Some(&self.version),
            "author" => Some(&self.author),
            "website" => Some(&self.website),
            "icon" => Some(&self.icon),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "name" => &mut self.name,
            "version" => &mut self.version,
            "author" => &mut self.author,
            "website" => &mut self.website,
            "icon" => &mut self.icon,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

/// Feature switches for the optional shell subsystems.
///
/// Deserializing overlays the file's entries on top of the built-in set, so a
/// file that names only some modules keeps the others at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct ModuleFlags(BTreeMap<String, bool>);

impl Default for ModuleFlags {
    fn default() -> Self {
        let flags = ["logging", "database", "menu", "toolbar", "status_bar"]
            .into_iter()
            .map(|name| (name.to_string(), true))
            .collect();
        Self(flags)
    }
}

impl From<BTreeMap<String, bool>> for ModuleFlags {
    fn from(overrides: BTreeMap<String, bool>) -> Self {
        let mut flags = Self::default();
        flags.0.extend(overrides);
        flags
    }
}

impl From<ModuleFlags> for BTreeMap<String, bool> {
    fn from(flags: ModuleFlags) -> Self {
        flags.0
    }
}

impl ModuleFlags {
    /// Unknown module names are reported as disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: &str, enabled: bool) {
        self.0.insert(name.to_string(), enabled);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Window geometry and startup flags written to the `[APP]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDefaults {
    #[serde(default = "default_start_maximized")]
    pub start_maximized: bool,

    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    #[serde(default)]
    pub dark_mode: bool,
}

fn default_start_maximized() -> bool {
    true
}

fn default_screen_width() -> u32 {
    800
}

fn default_screen_height() -> u32 {
    600
}

impl Default for AppDefaults {
    fn default() -> Self {
        Self {
            start_maximized: default_start_maximized(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            dark_mode: false,
        }
    }
}

/// Log destination, rotation and verbosity written to the `[LOGGING]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingDefaults {
    #[serde(default = "default_log_file")]
    pub log_file: String,

    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    #[serde(default = "default_backup_count")]
    pub backup_count: u32,

    #[serde(default = "default_level")]
    pub level: String,
}

fn default_log_file() -> String {
    "logs/app.log".to_string()
}

fn default_max_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_backup_count() -> u32 {
    3
}

fn default_level() -> String {
    "INFO".to_string()
}

impl Default for LoggingDefaults {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            max_bytes: default_max_bytes(),
            backup_count: default_backup_count(),
            level: default_level(),
        }
    }
}

/// The static settings record: seed values for the settings file and
/// fallbacks for typed reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppProfile {
    #[serde(default)]
    pub about: AboutInfo,

    #[serde(default)]
    pub modules: ModuleFlags,

    #[serde(default)]
    pub app: AppDefaults,

    #[serde(default)]
    pub logging: LoggingDefaults,
}

impl AppProfile {
    /// Load the profile from disk. A missing or unreadable file yields defaults.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(profile) => profile,
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::error!(
                    "Failed to load profile {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Re-serialize the whole record and atomically replace the file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        write_atomic(path, text.as_bytes())?;
        tracing::info!("Profile saved to {}", path.display());
        Ok(())
    }

    /// The document written when no settings file exists yet.
    pub fn seed_document(&self) -> SettingsDocument {
        let mut doc = SettingsDocument::new();
        write_app_section(&mut doc, &self.app);
        write_logging_section(&mut doc, &self.logging);
        doc
    }

    /// Project the whole record into sections so the editor bridge can edit it.
    pub fn to_document(&self) -> SettingsDocument {
        let mut doc = SettingsDocument::new();
        for key in AboutInfo::KEYS {
            if let Some(value) = self.about.get(key) {
                doc.set(SECTION_ABOUT, key, value);
            }
        }
        for (name, enabled) in self.modules.iter() {
            doc.set(SECTION_MODULES, name, format_bool(enabled));
        }
        write_app_section(&mut doc, &self.app);
        write_logging_section(&mut doc, &self.logging);
        doc
    }

    /// Fold an edited projection back into a new record.
    ///
    /// Options absent from the document keep their current values.
    pub fn apply_document(&self, doc: &SettingsDocument) -> Result<AppProfile> {
        let mut next = self.clone();

        if let Some(section) = doc.section(SECTION_ABOUT) {
            for (key, value) in section.entries() {
                if !next.about.set(key, value) {
                    tracing::warn!("Ignoring unknown about key '{}'", key);
                }
            }
        }

        if let Some(section) = doc.section(SECTION_MODULES) {
            for (name, value) in section.entries() {
                let enabled = parse_bool(value).ok_or_else(|| {
                    AppError::invalid_field(SECTION_MODULES, name, "expected True or False")
                })?;
                next.modules.set(name, enabled);
            }
        }

        if let Some(v) = doc.get(SECTION_APP, "start_maximized") {
            next.app.start_maximized = fold_bool(SECTION_APP, "start_maximized", v)?;
        }
        if let Some(v) = doc.get(SECTION_APP, "screen_width") {
            next.app.screen_width = fold_number(SECTION_APP, "screen_width", v)?;
        }
        if let Some(v) = doc.get(SECTION_APP, "screen_height") {
            next.app.screen_height = fold_number(SECTION_APP, "screen_height", v)?;
        }
        if let Some(v) = doc.get(SECTION_APP, "dark_mode") {
            next.app.dark_mode = fold_bool(SECTION_APP, "dark_mode", v)?;
        }

        if let Some(v) = doc.get(SECTION_LOGGING, "log_file") {
            next.logging.log_file = v.to_string();
        }
        if let Some(v) = doc.get(SECTION_LOGGING, "max_bytes") {
            next.logging.max_bytes = fold_number(SECTION_LOGGING, "max_bytes", v)?;
        }
        if let Some(v) = doc.get(SECTION_LOGGING, "backup_count") {
            next.logging.backup_count = fold_number(SECTION_LOGGING, "backup_count", v)?;
        }
        if let Some(v) = doc.get(SECTION_LOGGING, "level") {
            next.logging.level = v.to_string();
        }

        Ok(next)
    }
}

fn write_app_section(doc: &mut SettingsDocument, app: &AppDefaults) {
    doc.set(SECTION_APP, "start_maximized", format_bool(app.start_maximized));
    doc.set(SECTION_APP, "screen_width", app.screen_width.to_string());
    doc.set(SECTION_APP, "screen_height", app.screen_height.to_string());
    doc.set(SECTION_APP, "dark_mode", format_bool(app.dark_mode));
}

fn write_logging_section(doc: &mut SettingsDocument, logging: &LoggingDefaults) {
    doc.set(SECTION_LOGGING, "log_file", logging.log_file.as_str());
    doc.set(SECTION_LOGGING, "max_bytes", logging.max_bytes.to_string());
    doc.set(SECTION_LOGGING, "backup_count", logging.backup_count.to_string());
    doc.set(SECTION_LOGGING, "level", logging.level.as_str());
}

fn fold_bool(section: &str, key: &str, value: &str) -> Result<bool> {
    parse_bool(value).ok_or_else(|| AppError::invalid_field(section, key, "expected True or False"))
}

fn fold_number<T: std::str::FromStr>(section: &str, key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_field(section, key, "expected a whole number"))
}

/// Booleans are persisted as `True` / `False`.
pub fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Accepts the spellings INI files commonly use for booleans.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = AppProfile::default();
        assert_eq!(profile.about.name, "Deskkit Pro");
        assert_eq!(profile.about.version, "1.0");
        assert!(profile.modules.is_enabled("logging"));
        assert!(profile.modules.is_enabled("status_bar"));
        assert!(!profile.modules.is_enabled("nonexistent"));
        assert!(profile.app.start_maximized);
        assert_eq!(profile.app.screen_width, 800);
        assert_eq!(profile.app.screen_height, 600);
        assert!(!profile.app.dark_mode);
        assert_eq!(profile.logging.log_file, "logs/app.log");
        assert_eq!(profile.logging.max_bytes, 5_242_880);
        assert_eq!(profile.logging.backup_count, 3);
        assert_eq!(profile.logging.level, "INFO");
    }

    #[test]
    fn test_about_lookup() {
        let about = AboutInfo::default();
        assert_eq!(about.get("website"), Some("https://www.yourwebsite.com"));
        assert_eq!(about.get("license"), None);
    }

    #[test]
    fn test_partial_profile() {
        // Older files may carry only some tables and keys
        let text = "[app]\nscreen_width = 1280\n\n[modules]\ndatabase = false\n";
        let profile: AppProfile = toml::from_str(text).unwrap();
        assert_eq!(profile.app.screen_width, 1280);
        assert_eq!(profile.app.screen_height, 600);
        assert!(!profile.modules.is_enabled("database"));
        assert!(profile.modules.is_enabled("menu"));
        assert_eq!(profile.about, AboutInfo::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut profile = AppProfile::default();
        profile.about.author = "Ferris".to_string();
        profile.modules.set("toolbar", false);
        profile.save(&path).unwrap();

        let loaded = AppProfile::load(&path);
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_load_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        assert_eq!(AppProfile::load(&path), AppProfile::default());

        fs::write(&path, "this is = = not toml").unwrap();
        assert!(matches!(AppProfile::try_load(&path), Err(AppError::ProfileParse(_))));
        assert_eq!(AppProfile::load(&path), AppProfile::default());
    }

    #[test]
    fn test_seed_document() {
        let doc = AppProfile::default().seed_document();
        assert_eq!(doc.get(SECTION_APP, "start_maximized"), Some("True"));
        assert_eq!(doc.get(SECTION_APP, "screen_width"), Some("800"));
        assert_eq!(doc.get(SECTION_APP, "screen_height"), Some("600"));
        assert_eq!(doc.get(SECTION_APP, "dark_mode"), Some("False"));
        assert_eq!(doc.get(SECTION_LOGGING, "log_file"), Some("logs/app.log"));
        assert_eq!(doc.get(SECTION_LOGGING, "max_bytes"), Some("5242880"));
        assert_eq!(doc.get(SECTION_LOGGING, "backup_count"), Some("3"));
        assert_eq!(doc.get(SECTION_LOGGING, "level"), Some("INFO"));
        assert!(!doc.has_section(SECTION_ABOUT));
    }

    #[test]
    fn test_document_projection_round_trip() {
        let profile = AppProfile::default();
        let doc = profile.to_document();
        assert_eq!(doc.get(SECTION_ABOUT, "icon"), Some("resources/icons/app_icon.png"));
        assert_eq!(doc.get(SECTION_MODULES, "menu"), Some("True"));
        assert_eq!(profile.apply_document(&doc).unwrap(), profile);
    }

    #[test]
    fn test_apply_document_updates_fields() {
        let profile = AppProfile::default();
        let mut doc = profile.to_document();
        doc.set(SECTION_ABOUT, "name", "Renamed");
        doc.set(SECTION_MODULES, "database", "False");
        doc.set(SECTION_APP, "screen_width", "1920");
        doc.set(SECTION_LOGGING, "level", "DEBUG");

        let next = profile.apply_document(&doc).unwrap();
        assert_eq!(next.about.name, "Renamed");
        assert!(!next.modules.is_enabled("database"));
        assert_eq!(next.app.screen_width, 1920);
        assert_eq!(next.logging.level, "DEBUG");
        // the source profile is left as it was
        assert_eq!(profile.app.screen_width, 800);
    }

    #[test]
    fn test_apply_document_rejects_bad_number() {
        let profile = AppProfile::default();
        let mut doc = profile.to_document();
        doc.set(SECTION_LOGGING, "max_bytes", "lots");
        let err = profile.apply_document(&doc).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidFieldValue { ref key, .. } if key == "max_bytes"
        ));
    }

    #[test]
    fn test_parse_bool_spellings() {
        for s in ["True", "true", "YES", "on", "1"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["False", "no", "OFF", "0"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(format_bool(true), "True");
        assert_eq!(format_bool(false), "False");
    }
}
