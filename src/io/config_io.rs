use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

const CONFIG_FILE: &str = "config.toml";

/// Error type for reading config.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid storage key {key:?} in {path}: must be a plain file name")]
    InvalidStorageKey { path: PathBuf, key: String },
}

/// Where tasks, config and the diagnostics log live when `-C` is not given:
/// `$XDG_DATA_HOME/todo`, falling back to `~/.local/share/todo`.
pub fn default_data_dir() -> PathBuf {
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_home.join("todo")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Read `config.toml` from the data directory. A missing file yields the
/// defaults; a malformed one, or a storage key that is not a plain file
/// name, is an error.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.clone(),
        source,
    })?;
    if !is_valid_storage_key(&config.storage.key) {
        return Err(ConfigError::InvalidStorageKey {
            path,
            key: config.storage.key,
        });
    }
    Ok(config)
}

/// The key becomes `<data dir>/<key>.json`, so it must be a bare file name.
fn is_valid_storage_key(key: &str) -> bool {
    !key.trim().is_empty()
        && !key.contains(['/', '\\', '\0'])
        && !key.contains("..")
        && key != "."
}
