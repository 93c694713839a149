//! Services layer - operations the shell calls into.
//!
//! This module contains the settings operations:
//! - Settings store (load, typed reads, save)
//! - Logging configuration and subscriber setup
//! - Settings editor bridge
//! - Theme discovery and selection

pub mod editor;
pub mod logging;
pub mod settings_store;
pub mod themes;
