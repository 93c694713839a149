//! Headless shell: boots the settings core the way a GUI shell would and
//! exposes the collaborator API as subcommands.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use deskkit::app::services::settings_store::{SETTINGS_FILE, default_config_dir};
use deskkit::app::services::{editor, logging, themes};
use deskkit::app::{Config, FieldKey, FieldKind, FieldValue, Result, ThemeState};

#[derive(Debug, Parser)]
#[command(
    name = "deskkit",
    about = "Settings, logging and theme core for desktop shells",
    version
)]
struct Cli {
    /// Path to the INI settings file. The profile is stored beside it.
    #[arg(long, env = "DESKKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print about info, window settings, module flags and logging setup.
    Show,
    /// List editable fields with their kinds and current values.
    Fields {
        /// Describe the static profile instead of the settings file.
        #[arg(long)]
        profile: bool,
    },
    /// Commit one edit and save it.
    Set {
        section: String,
        key: String,
        value: String,
        /// Edit the static profile instead of the settings file.
        #[arg(long)]
        profile: bool,
    },
    /// Validate a theme file and print its color roles.
    Theme { path: PathBuf },
    /// List theme files, creating the directory if needed.
    Themes {
        #[arg(default_value = "resources/styles")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let started = Instant::now();

    let path = cli
        .config
        .unwrap_or_else(|| default_config_dir().join(SETTINGS_FILE));
    let mut config = Config::load(path);

    if let Some(logging_config) = logging::plan(&config) {
        logging::init(&logging_config);
    }
    info!(
        "{} {} started in {}",
        config.get_about_info("name"),
        config.get_about_info("version"),
        logging::format_elapsed(started.elapsed())
    );

    match run(cli.command, &mut config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &mut Config) -> Result<()> {
    match command {
        Command::Show => {
            show(config);
            Ok(())
        }
        Command::Fields { profile } => {
            let doc = if profile {
                config.profile().to_document()
            } else {
                config.document().clone()
            };
            for field in editor::describe_fields(&doc) {
                println!(
                    "[{}] {}.{} ({}) = {}",
                    field.section_label,
                    field.section,
                    field.key,
                    kind_label(field.kind),
                    field.current_value
                );
            }
            Ok(())
        }
        Command::Set {
            section,
            key,
            value,
            profile,
        } => {
            let mut edits = BTreeMap::new();
            edits.insert(FieldKey::new(section, key), FieldValue::Text(value));
            if profile {
                let doc = editor::commit(&edits, &config.profile().to_document())?;
                let updated = config.profile().apply_document(&doc)?;
                config.replace_profile(updated);
                config.save_profile()?;
                println!("Saved {}", config.profile_path().display());
            } else {
                let doc = editor::commit(&edits, config.document())?;
                config.replace_document(doc);
                config.save()?;
                println!("Saved {}", config.path().display());
            }
            Ok(())
        }
        Command::Theme { path } => {
            let mut state = ThemeState::new();
            let theme = state.select(&path)?;
            for (role, color) in theme.roles() {
                println!("{:<18} {}", role, color);
            }
            Ok(())
        }
        Command::Themes { dir } => {
            if themes::ensure_theme_dir(&dir)? {
                println!("Created directory: {}", dir.display());
            }
            for path in themes::list_themes(&dir)? {
                let status = match themes::read_theme(&path) {
                    Ok(_) => "ok".to_string(),
                    Err(e) => e.to_string(),
                };
                println!("{}  {}", path.display(), status);
            }
            Ok(())
        }
    }
}

fn show(config: &Config) {
    println!("About");
    for key in ["name", "version", "author", "website", "icon"] {
        println!("  {:<16} {}", key, config.get_about_info(key));
    }

    let maximized = config.get_bool("APP", "start_maximized", true);
    let width = config.get_int("APP", "screen_width", 800);
    let height = config.get_int("APP", "screen_height", 600);
    println!("Window");
    if maximized {
        println!("  maximized");
    } else {
        println!("  {}x{}", width, height);
    }
    println!("  dark mode        {}", config.get_bool("APP", "dark_mode", false));

    println!("Modules");
    for (name, _) in config.profile().modules.iter() {
        println!("  {:<16} {}", name, config.is_module_enabled(name));
    }

    let logging_config = logging::resolve(config.document(), &config.profile().logging);
    println!("Logging");
    println!("  {:<16} {}", "enabled", config.is_module_enabled("logging"));
    println!("  {:<16} {}", "file", logging_config.path.display());
    println!("  {:<16} {}", "max_bytes", logging_config.max_bytes);
    println!("  {:<16} {}", "backup_count", logging_config.backup_count);
    println!("  {:<16} {}", "level", logging_config.level);
}

fn kind_label(kind: FieldKind) -> String {
    match kind {
        FieldKind::Text(rule) => format!("text/{:?}", rule).to_lowercase(),
        FieldKind::Boolean => "boolean".to_string(),
        FieldKind::Choice(options) => format!("choice: {}", options.join("|")),
    }
}
