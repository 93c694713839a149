//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with the file system:
//! - INI settings codec
//! - Atomic file replacement
//! - Error types

pub mod error;
pub mod fs;
pub mod ini;
