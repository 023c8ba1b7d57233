//! Configuration for the profile completion library.
//!
//! Stored as TOML at `<workspace>/config/config.toml`, where the workspace is
//! `MARKETPLACE_HOME` or the OS data directory. A missing file means
//! defaults.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the workspace root.
pub const HOME_ENV: &str = "MARKETPLACE_HOME";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where per-user records live and how their keys are spelled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Directory (relative to the workspace root) holding the JSON store.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,
    /// Prefix of the per-user document key (`<prefix>_<userId>`).
    #[serde(default = "default_documents_prefix")]
    pub documents_prefix: String,
    /// Middle part of experience keys (`<userType>_<suffix>_<userId>`).
    #[serde(default = "default_experience_suffix")]
    pub experience_suffix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            documents_prefix: default_documents_prefix(),
            experience_suffix: default_experience_suffix(),
        }
    }
}

fn default_store_dir() -> String {
    "store".to_string()
}

fn default_documents_prefix() -> String {
    "uploads_demo".to_string()
}

fn default_experience_suffix() -> String {
    "experience".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info,marketplace_profiles=debug".to_string()
}

/// Returns the root directory where the library stores data.
///
/// Order of precedence:
/// 1. `MARKETPLACE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("MarketplaceProfiles"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config").join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let path = config_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

impl AppConfig {
    /// Absolute path of the JSON store directory.
    pub fn store_path(&self) -> Result<PathBuf> {
        Ok(workspace_root()?.join(&self.storage.store_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [storage]
            documents_prefix = "docs"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.storage.documents_prefix, "docs");
        assert_eq!(cfg.storage.store_dir, "store");
        assert_eq!(cfg.logging, LoggingSettings::default());
    }

    #[test]
    fn toml_round_trip() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }
}
