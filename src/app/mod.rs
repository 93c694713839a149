//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (SettingsDocument, AppProfile, ThemeDescriptor, fields)
//! - `services/` - Operations (settings store, logging, editor bridge, themes)
//! - `infrastructure/` - File system integrations (INI codec, atomic writes, error)

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use domain::{
    AboutInfo, AppDefaults, AppProfile, FieldDescriptor, FieldKey, FieldKind, FieldValue,
    LoggingDefaults, ModuleFlags, SettingsDocument, TextRule, ThemeDescriptor,
};
pub use infrastructure::error::{AppError, Result};
pub use services::logging::LoggingConfig;
pub use services::settings_store::Config;
pub use services::themes::ThemeState;
