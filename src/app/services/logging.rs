//! Logging parameters derived from the `[LOGGING]` section, and the
//! subscriber that puts them into effect.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::app::domain::document::SettingsDocument;
use crate::app::domain::settings::{LoggingDefaults, SECTION_LOGGING};
use crate::app::services::settings_store::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub path: PathBuf,
    pub max_bytes: u64,
    pub backup_count: u32,
    pub level: String,
}

impl LoggingConfig {
    /// Map the configured level onto a tracing level.
    ///
    /// `CRITICAL` has no tracing counterpart and maps to `ERROR`.
    pub fn tracing_level(&self) -> Option<Level> {
        match self.level.as_str() {
            "DEBUG" => Some(Level::DEBUG),
            "INFO" => Some(Level::INFO),
            "WARNING" => Some(Level::WARN),
            "ERROR" | "CRITICAL" => Some(Level::ERROR),
            _ => None,
        }
    }
}

/// Derive logging parameters. Each field falls back independently.
pub fn resolve(doc: &SettingsDocument, defaults: &LoggingDefaults) -> LoggingConfig {
    let raw = |key: &str| doc.get(SECTION_LOGGING, key);

    let path = raw("log_file")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&defaults.log_file));

    let max_bytes = parse_or(raw("max_bytes"), "max_bytes", defaults.max_bytes);
    let backup_count = parse_or(raw("backup_count"), "backup_count", defaults.backup_count);

    let level = raw("level")
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(normalize_level)
        .unwrap_or_else(|| normalize_level(&defaults.level));

    LoggingConfig {
        path,
        max_bytes,
        backup_count,
        level,
    }
}

/// Logging parameters to install, or `None` when the `logging` module is
/// switched off in the profile.
pub fn plan(config: &Config) -> Option<LoggingConfig> {
    if !config.is_module_enabled("logging") {
        return None;
    }
    Some(resolve(config.document(), &config.profile().logging))
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, key: &str, fallback: T) -> T {
    match raw {
        None => fallback,
        Some(s) => s.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid LOGGING.{} value '{}'; using default", key, s);
            fallback
        }),
    }
}

/// Canonical uppercase spelling for known levels; anything else unchanged.
pub fn normalize_level(level: &str) -> String {
    match level.trim().to_ascii_uppercase().as_str() {
        "DEBUG" => "DEBUG".to_string(),
        "INFO" => "INFO".to_string(),
        "WARN" | "WARNING" => "WARNING".to_string(),
        "ERROR" => "ERROR".to_string(),
        "CRITICAL" | "FATAL" => "CRITICAL".to_string(),
        _ => level.to_string(),
    }
}

/// Size-based rotating log file.
///
/// Before a write would push the file past `max_bytes`, `app.log` becomes
/// `app.log.1`, `app.log.1` becomes `app.log.2` and so on, keeping at most
/// `backup_count` old files. With `backup_count == 0` the file is truncated.
/// A `max_bytes` of zero disables rotation.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backup_count: u32,
    file: File,
    written: u64,
}

impl RotatingFile {
    pub fn open(path: &Path, max_bytes: u64, backup_count: u32) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    fn backup_path(&self, n: u32) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backup_count > 0 {
            let oldest = self.backup_path(self.backup_count);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for n in (1..self.backup_count).rev() {
                let from = self.backup_path(n);
                if from.exists() {
                    fs::rename(&from, self.backup_path(n + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
            self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        } else {
            self.file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.path)?;
        }
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.max_bytes > 0
            && self.written > 0
            && self.written + buf.len() as u64 > self.max_bytes
        {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Install the global subscriber: stderr plus the rotating log file.
///
/// `RUST_LOG` overrides the configured level. If the log file cannot be
/// opened the subscriber is installed with stderr only and the failure is
/// logged there. Returns `false` when a subscriber was already installed.
pub fn init(config: &LoggingConfig) -> bool {
    let level = config.tracing_level().unwrap_or_else(|| {
        eprintln!("Unknown log level '{}', using INFO", config.level);
        Level::INFO
    });
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

    let opened = RotatingFile::open(&config.path, config.max_bytes, config.backup_count);
    let (file, open_error) = match opened {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };
    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init()
        .is_ok();

    if !installed {
        return false;
    }
    match open_error {
        Some(e) => tracing::warn!(
            "Cannot open log file {}: {}. Logging to stderr only.",
            config.path.display(),
            e
        ),
        None => tracing::info!(
            "Logging to {} (level {}, max {} bytes, {} backups)",
            config.path.display(),
            config.level,
            config.max_bytes,
            config.backup_count
        ),
    }
    true
}

/// Render a duration as `"{h}h {m}m {s.ss}s"` for timing log lines.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0).floor();
    let rem = total - hours * 3600.0;
    let minutes = (rem / 60.0).floor();
    let seconds = rem - minutes * 60.0;
    format!("{}h {}m {:.2}s", hours as u64, minutes as u64, seconds)
}
