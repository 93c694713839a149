//! Settings, logging and theme core for a desktop application shell.
//!
//! The shell owns the widgets; this crate owns the data they show. See
//! [`app::Config`] for the entry point.

pub mod app;
