use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::theme::ThemeDescriptor;
use crate::app::infrastructure::error::Result;

/// Create the theme directory if it does not exist yet.
/// Returns true when it had to be created.
pub fn ensure_theme_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    tracing::info!("Created theme directory: {}", dir.display());
    Ok(true)
}

/// `*.json` files in `dir`, sorted by file name.
pub fn list_themes(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut themes: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    themes.sort();
    Ok(themes)
}

/// Read and validate a theme file.
pub fn read_theme(path: &Path) -> Result<ThemeDescriptor> {
    let bytes = fs::read(path)?;
    ThemeDescriptor::validate(&bytes)
}

/// The active theme. A rejected selection keeps the previous one.
#[derive(Debug, Default)]
pub struct ThemeState {
    active: Option<ThemeDescriptor>,
    source: Option<PathBuf>,
}

impl ThemeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ThemeDescriptor> {
        self.active.as_ref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn select(&mut self, path: &Path) -> Result<&ThemeDescriptor> {
        tracing::info!("Applying theme from: {}", path.display());
        match read_theme(path) {
            Ok(theme) => {
                self.source = Some(path.to_path_buf());
                tracing::info!("Theme applied successfully.");
                Ok(&*self.active.insert(theme))
            }
            Err(e) => {
                tracing::error!("Theme application error for {}: {}", path.display(), e);
                Err(e)
            }
        }
    }
}
