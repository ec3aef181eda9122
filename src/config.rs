//! Configuration management.
//!
//! Settings come from a TOML config file with serde defaults for every
//! field, so an absent file yields a usable local setup. A `--target`
//! style database override from the CLI wins over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default page size for document listings.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// On-disk config file shape.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// Data directory holding the database.
    data_dir: Option<PathBuf>,
    /// Database file, absolute or relative to `data_dir`.
    database: Option<PathBuf>,
    /// Server bind address.
    bind: Option<String>,
    /// Default page size.
    batch_size: Option<usize>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub bind: String,
    pub batch_size: usize,
}

impl Settings {
    fn from_file(file: ConfigFile) -> Self {
        let data_dir = file.data_dir.unwrap_or_else(default_data_dir);
        let db_path = match file.database {
            Some(path) if path.is_absolute() => path,
            Some(path) => data_dir.join(path),
            None => data_dir.join("gmrview.db"),
        };
        Self {
            data_dir,
            db_path,
            bind: file.bind.unwrap_or_else(|| "127.0.0.1:3030".to_string()),
            batch_size: file.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("gmrview"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load settings from an explicit config path, or from `gmrview.toml`
/// in the working directory, or fall back to defaults. An explicit path
/// that cannot be read is an error; the implicit one is optional.
pub fn load_settings(config: Option<&Path>, target: Option<&Path>) -> anyhow::Result<Settings> {
    let file = match config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
            toml::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?
        }
        None => {
            let implicit = PathBuf::from("gmrview.toml");
            if implicit.exists() {
                let raw = fs::read_to_string(&implicit)?;
                toml::from_str(&raw)
                    .map_err(|e| anyhow::anyhow!("invalid config gmrview.toml: {}", e))?
            } else {
                ConfigFile::default()
            }
        }
    };

    let mut settings = Settings::from_file(file);

    // CLI target override: a .db file directly, or a directory that
    // contains (or will contain) gmrview.db.
    if let Some(target) = target {
        if target.extension().is_some_and(|ext| ext == "db") {
            settings.db_path = target.to_path_buf();
            if let Some(parent) = target.parent() {
                settings.data_dir = parent.to_path_buf();
            }
        } else {
            settings.data_dir = target.to_path_buf();
            settings.db_path = target.join("gmrview.db");
        }
    }

    Ok(settings)
}
