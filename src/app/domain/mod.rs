//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The in-memory settings document
//! - The static application profile (about, modules, defaults)
//! - Theme descriptors
//! - Editable field metadata

pub mod document;
pub mod fields;
pub mod settings;
pub mod theme;

pub use document::{Section, SettingsDocument};
pub use fields::{FieldDescriptor, FieldKey, FieldKind, FieldValue, TextRule};
pub use settings::{AboutInfo, AppDefaults, AppProfile, LoggingDefaults, ModuleFlags};
pub use theme::ThemeDescriptor;
