//! Settings persistence with fallback-always reads.
//!
//! [`Config`] owns both the INI settings document and the static
//! [`AppProfile`]. It is constructed once by the shell and passed to whoever
//! needs it; there is no global instance. Access is expected to be serialized
//! by that single owner.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::document::SettingsDocument;
use crate::app::domain::settings::{AboutInfo, AppProfile, SECTION_APP, SECTION_LOGGING, parse_bool};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::fs::write_atomic;
use crate::app::infrastructure::ini;

pub const SETTINGS_FILE: &str = "config.ini";
pub const PROFILE_FILE: &str = "settings.toml";

/// Returned by [`Config::get_about_info`] for keys the record does not have.
pub const UNKNOWN: &str = "Unknown";

/// Parse a stored string into a typed value. `None` means "treat as absent".
pub trait FromSetting: Sized {
    fn from_setting(raw: &str) -> Option<Self>;
}

impl FromSetting for bool {
    fn from_setting(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }
}

impl FromSetting for String {
    fn from_setting(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

macro_rules! from_setting_int {
    ($($t:ty),*) => {
        $(impl FromSetting for $t {
            fn from_setting(raw: &str) -> Option<Self> {
                raw.trim().parse().ok()
            }
        })*
    };
}

from_setting_int!(i32, i64, u32, u64, usize);

/// Read the settings file, creating it from the profile defaults first if it
/// does not exist.
pub fn try_load(path: &Path, seed: &AppProfile) -> Result<SettingsDocument> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created config directory: {}", parent.display());
        }
    }

    if !path.exists() {
        let doc = seed.seed_document();
        write_atomic(path, ini::render(&doc).as_bytes())?;
        tracing::info!("Default config created at: {}", path.display());
    }

    let text = fs::read_to_string(path)?;
    let doc = ini::parse(&text)?;
    tracing::info!("Configuration loaded from {}", path.display());
    Ok(doc)
}

/// Like [`try_load`] but never fails: errors are logged and the seed document
/// is returned instead.
pub fn load(path: &Path, seed: &AppProfile) -> SettingsDocument {
    match try_load(path, seed) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!("Failed to load config {}: {}. Using defaults.", path.display(), e);
            seed.seed_document()
        }
    }
}

/// Serialize `doc` and atomically replace the file at `path`.
pub fn save(path: &Path, doc: &SettingsDocument) -> Result<()> {
    write_atomic(path, ini::render(doc).as_bytes())?;
    tracing::info!("Configuration saved to {}", path.display());
    Ok(())
}

/// Platform config directory for the application (cross-platform)
pub fn default_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("deskkit");
    path
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    profile_path: PathBuf,
    profile: AppProfile,
    document: SettingsDocument,
}

impl Config {
    /// Load the settings file at `path` and the profile stored beside it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profile_path = path.with_file_name(PROFILE_FILE);
        Self::load_with_profile(path, profile_path)
    }

    pub fn load_with_profile(path: impl Into<PathBuf>, profile_path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profile_path = profile_path.into();
        let profile = AppProfile::load(&profile_path);
        let document = load(&path, &profile);
        Self {
            path,
            profile_path,
            profile,
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    pub fn document(&self) -> &SettingsDocument {
        &self.document
    }

    /// Swap in a document produced by a successful editor commit.
    pub fn replace_document(&mut self, document: SettingsDocument) {
        self.document = document;
    }

    pub fn profile(&self) -> &AppProfile {
        &self.profile
    }

    pub fn replace_profile(&mut self, profile: AppProfile) {
        self.profile = profile;
    }

    pub fn about(&self) -> &AboutInfo {
        &self.profile.about
    }

    /// Stored value or `fallback`. Never fails.
    pub fn get(&self, section: &str, option: &str, fallback: &str) -> String {
        match self.document.section(section) {
            None => {
                tracing::warn!("Section '{}' not found in config file.", section);
                fallback.to_string()
            }
            Some(s) => match s.get(option) {
                Some(value) => value.to_string(),
                None => {
                    tracing::warn!(
                        "Option '{}' not found in section '{}' of config file.",
                        option,
                        section
                    );
                    fallback.to_string()
                }
            },
        }
    }

    /// Typed read. A value that does not parse is treated as absent.
    pub fn get_typed<T: FromSetting>(&self, section: &str, option: &str, fallback: T) -> T {
        let Some(raw) = self.document.get(section, option) else {
            tracing::warn!(
                "Option '{}' not found in section '{}' of config file.",
                option,
                section
            );
            return fallback;
        };
        match T::from_setting(raw) {
            Some(value) => value,
            None => {
                tracing::warn!(
                    "Could not parse {}.{} = '{}'; using fallback",
                    section,
                    option,
                    raw
                );
                fallback
            }
        }
    }

    pub fn get_bool(&self, section: &str, option: &str, fallback: bool) -> bool {
        self.get_typed(section, option, fallback)
    }

    pub fn get_int(&self, section: &str, option: &str, fallback: i64) -> i64 {
        self.get_typed(section, option, fallback)
    }

    pub fn get_app_setting(&self, option: &str, fallback: &str) -> String {
        self.get(SECTION_APP, option, fallback)
    }

    pub fn get_logging_setting(&self, option: &str, fallback: &str) -> String {
        self.get(SECTION_LOGGING, option, fallback)
    }

    pub fn get_about_info(&self, key: &str) -> String {
        self.profile.about.get(key).unwrap_or(UNKNOWN).to_string()
    }

    pub fn is_module_enabled(&self, name: &str) -> bool {
        self.profile.modules.is_enabled(name)
    }

    /// In-memory only; call [`Config::save`] to persist.
    ///
    /// Entries that would not read back unchanged after a save are rejected
    /// with `InvalidFieldValue` and leave the document as it was.
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        ini::check_entry(section, option, &value)?;
        self.document.set(section, option, value.trim());
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.document)
    }

    pub fn save_profile(&self) -> Result<()> {
        self.profile.save(&self.profile_path)
    }
}
