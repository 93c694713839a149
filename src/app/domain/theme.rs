use serde_json::Value;

use crate::app::infrastructure::error::{AppError, Result};

/// Color roles every theme file must define, in reporting order.
pub const REQUIRED_ROLES: [&str; 7] = [
    "window_background",
    "window_text",
    "button_background",
    "button_text",
    "menu_background",
    "menu_text",
    "highlight_color",
];

/// A complete, validated theme. Color values are opaque strings handed to the
/// renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub window_background: String,
    pub window_text: String,
    pub button_background: String,
    pub button_text: String,
    pub menu_background: String,
    pub menu_text: String,
    pub highlight_color: String,
}

impl ThemeDescriptor {
    /// Validate raw theme file bytes.
    ///
    /// Every missing role is reported at once. Extra keys are ignored.
    pub fn validate(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() {
            return Err(AppError::EmptyThemeFile);
        }

        let data: Value = serde_json::from_slice(raw)
            .map_err(|e| AppError::MalformedThemeFile(format!("invalid JSON: {}", e)))?;
        let Value::Object(map) = data else {
            return Err(AppError::MalformedThemeFile(
                "top level must be a JSON object".to_string(),
            ));
        };

        let missing: Vec<String> = REQUIRED_ROLES
            .iter()
            .filter(|role| !map.contains_key(**role))
            .map(|role| role.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::IncompleteTheme { missing });
        }

        let role = |name: &str| -> Result<String> {
            match map.get(name) {
                Some(Value::String(s)) => Ok(s.clone()),
                _ => Err(AppError::MalformedThemeFile(format!(
                    "role '{}' must be a string",
                    name
                ))),
            }
        };

        Ok(Self {
            window_background: role("window_background")?,
            window_text: role("window_text")?,
            button_background: role("button_background")?,
            button_text: role("button_text")?,
            menu_background: role("menu_background")?,
            menu_text: role("menu_text")?,
            highlight_color: role("highlight_color")?,
        })
    }

    /// Role name and color pairs in declaration order.
    pub fn roles(&self) -> [(&'static str, &str); 7] {
        [
            ("window_background", &self.window_background),
            ("window_text", &self.window_text),
            ("button_background", &self.button_background),
            ("button_text", &self.button_text),
            ("menu_background", &self.menu_background),
            ("menu_text", &self.menu_text),
            ("highlight_color", &self.highlight_color),
        ]
    }
}
