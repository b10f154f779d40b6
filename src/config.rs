//! Persistent configuration model and file I/O.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

/// Root configuration persisted to `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    #[serde(default)]
    /// Library import preferences.
    pub library: LibraryConfig,
    #[serde(default)]
    /// Metadata extraction preferences.
    pub metadata: MetadataConfig,
}

/// Library import preferences persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LibraryConfig {
    /// Folders scanned by bulk import.
    #[serde(default)]
    pub folders: Vec<String>,
}

/// Metadata extraction preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MetadataConfig {
    /// Separator used to split a tag's artist field into artist names.
    #[serde(default = "default_artist_separator")]
    pub artist_separator: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            artist_separator: default_artist_separator(),
        }
    }
}

fn default_artist_separator() -> String {
    ";".to_string()
}

/// Path of the per-user config file, when a config directory exists.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tunedeck").join("config.toml"))
}

/// Reads the config at `path`, falling back to defaults on a missing or
/// malformed file.
pub fn load_config_from(path: &Path) -> Config {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            warn!(
                "Config: using defaults, could not read {}: {}",
                path.display(),
                error
            );
            return Config::default();
        }
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(error) => {
            warn!(
                "Config: using defaults, could not parse {}: {}",
                path.display(),
                error
            );
            Config::default()
        }
    }
}

/// Reads the per-user config, falling back to defaults.
pub fn load_config() -> Config {
    match config_file_path() {
        Some(path) => load_config_from(&path),
        None => Config::default(),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
pub fn save_config_to(path: &Path, config: &Config) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| format!("Failed to create {}: {}", parent.display(), error))?;
    }
    let contents = toml::to_string(config)
        .map_err(|error| format!("Failed to serialize config: {error}"))?;
    fs::write(path, contents)
        .map_err(|error| format!("Failed to write {}: {}", path.display(), error))
}

/// Writes `config` to the per-user config file.
pub fn save_config(config: &Config) -> Result<(), String> {
    let path = config_file_path().ok_or_else(|| "No config directory available".to_string())?;
    save_config_to(&path, config)
}
