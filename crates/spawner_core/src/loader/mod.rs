mod atomic_io;
mod hashing;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::settings::{EntityCatalog, Settings, SettingsParseError};

use atomic_io::write_text_atomic;
use hashing::hash_config_inputs;

pub const CONFIG_ENV_VAR: &str = "SPAWNERTWEAKS_CONFIG";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_CONFIG_JSON: &str = include_str!("../../assets/config.default.json");

#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: SettingsParseError,
    },
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A parsed snapshot together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    pub digest_sha256_hex: String,
}

pub fn load_settings(
    path: &Path,
    catalog: &EntityCatalog,
) -> Result<LoadedSettings, SettingsLoadError> {
    let bytes = fs::read(path).map_err(|source| SettingsLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let digest_sha256_hex = hash_config_inputs(&bytes, catalog);
    let raw = String::from_utf8_lossy(&bytes);
    let settings =
        Settings::from_json_str(&raw, catalog).map_err(|source| SettingsLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        path = %path.display(),
        digest = %digest_sha256_hex,
        worlds = settings.per_world().len(),
        entity_overrides = settings.per_entity().len(),
        whitelist = settings.whitelist().len(),
        blacklist = settings.blacklist().len(),
        safety_caps_disabled = settings.disable_safety_caps(),
        "settings_loaded"
    );

    Ok(LoadedSettings {
        settings,
        path: path.to_path_buf(),
        digest_sha256_hex,
    })
}

/// Writes the bundled default configuration unless a file is already there.
/// Returns whether anything was written.
pub fn save_default_config(path: &Path) -> Result<bool, SettingsLoadError> {
    if path.exists() {
        return Ok(false);
    }
    write_text_atomic(path, DEFAULT_CONFIG_JSON).map_err(|source| SettingsLoadError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "default_config_written");
    Ok(true)
}

pub fn resolve_config_path() -> Result<PathBuf, SettingsLoadError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => Ok(PathBuf::from(value.trim())),
        Ok(_) | Err(env::VarError::NotPresent) => Ok(PathBuf::from(DEFAULT_CONFIG_FILE_NAME)),
        Err(source) => Err(SettingsLoadError::EnvVar {
            var: CONFIG_ENV_VAR,
            source,
        }),
    }
}
