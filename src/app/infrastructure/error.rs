use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file error at line {line}: {message}")]
    SettingsParse { line: usize, message: String },

    #[error("Profile parse error: {0}")]
    ProfileParse(#[from] toml::de::Error),

    #[error("Profile serialize error: {0}")]
    ProfileSerialize(#[from] toml::ser::Error),

    #[error("Theme file is empty")]
    EmptyThemeFile,

    #[error("Malformed theme file: {0}")]
    MalformedThemeFile(String),

    #[error("Missing required fields in theme file: {}", .missing.join(", "))]
    IncompleteTheme { missing: Vec<String> },

    #[error("Invalid value for {section}.{key}: {reason}")]
    InvalidFieldValue {
        section: String,
        key: String,
        reason: String,
    },
}

impl AppError {
    pub(crate) fn invalid_field(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::SettingsParse {
            line: 3,
            message: "missing section header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Settings file error at line 3: missing section header"
        );

        let err = AppError::IncompleteTheme {
            missing: vec!["menu_text".to_string(), "highlight_color".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required fields in theme file: menu_text, highlight_color"
        );

        let err = AppError::invalid_field("APP", "screen_width", "expected a whole number");
        assert_eq!(
            err.to_string(),
            "Invalid value for APP.screen_width: expected a whole number"
        );
    }
}
