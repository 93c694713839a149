//! In-memory mirror of the INI settings file.
//!
//! Values are always strings; typed interpretation happens in the store.
//! Sections and options keep their insertion order so rendering is stable.

/// One `[NAME]` block of the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        let option = normalize_option(option);
        self.entries
            .iter()
            .find(|(k, _)| *k == option)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite an option. Returns the previous value if any.
    pub fn set(&mut self, option: &str, value: impl Into<String>) -> Option<String> {
        let option = normalize_option(option);
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == option) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((option, value));
                None
            }
        }
    }

    pub fn remove(&mut self, option: &str) -> Option<String> {
        let option = normalize_option(option);
        let idx = self.entries.iter().position(|(k, _)| *k == option)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two-level mapping: section name -> (option name -> string value).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDocument {
    sections: Vec<Section>,
}

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Get a section, creating it at the end if absent.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.section(section)?.get(option)
    }

    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) -> Option<String> {
        self.section_mut(section).set(option, value)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Option names are case-insensitive and stored lower-cased.
pub(crate) fn normalize_option(option: &str) -> String {
    option.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut doc = SettingsDocument::new();
        assert_eq!(doc.set("APP", "screen_width", "800"), None);
        assert_eq!(doc.get("APP", "screen_width"), Some("800"));
        assert_eq!(doc.get("APP", "missing"), None);
        assert_eq!(doc.get("NOPE", "screen_width"), None);
    }

    #[test]
    fn test_overwrite_returns_previous() {
        let mut doc = SettingsDocument::new();
        doc.set("APP", "dark_mode", "False");
        assert_eq!(doc.set("APP", "dark_mode", "True"), Some("False".to_string()));
        assert_eq!(doc.section("APP").map(Section::len), Some(1));
    }

    #[test]
    fn test_option_names_case_insensitive() {
        let mut doc = SettingsDocument::new();
        doc.set("APP", "Screen_Width", "1024");
        assert_eq!(doc.get("APP", "screen_width"), Some("1024"));
        assert_eq!(doc.get("APP", "SCREEN_WIDTH"), Some("1024"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut doc = SettingsDocument::new();
        doc.set("LOGGING", "level", "INFO");
        doc.set("APP", "start_maximized", "True");
        doc.set("APP", "screen_width", "800");

        let names: Vec<&str> = doc.sections().map(Section::name).collect();
        assert_eq!(names, vec!["LOGGING", "APP"]);

        let keys: Vec<&str> = doc.section("APP").unwrap().entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["start_maximized", "screen_width"]);
    }

    #[test]
    fn test_remove() {
        let mut doc = SettingsDocument::new();
        doc.set("APP", "dark_mode", "False");
        assert_eq!(doc.section_mut("APP").remove("dark_mode"), Some("False".to_string()));
        assert!(doc.section("APP").unwrap().is_empty());
    }
}
