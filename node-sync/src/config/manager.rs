// File: node-sync/src/config/manager.rs
use super::{ConfigFile, SyncConfig};
use crate::errors::ConfigError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

pub struct ConfigManager {
    current_config: Arc<SyncConfig>,
    source: PathBuf,
}

impl ConfigManager {
    /// Load the configuration at `config_path` and make sure its directories
    /// exist. Only a directory that cannot be created is an error; a missing
    /// or broken file falls back to defaults.
    pub async fn new(config_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let source = config_path.into();
        let config = Self::load_configuration(&source).await;
        ensure_directories(&config).await?;

        Ok(Self {
            current_config: Arc::new(config),
            source,
        })
    }

    pub fn get_current_config(&self) -> Arc<SyncConfig> {
        self.current_config.clone()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Defaults overlaid with whatever the file provides. Never fails.
    pub async fn load_configuration(config_path: &Path) -> SyncConfig {
        match read_config_file(config_path).await {
            Ok(Some(file)) => {
                debug!("Loaded config overrides from {}", config_path.display());
                SyncConfig::default().merged_with(file)
            }
            Ok(None) => {
                info!(
                    "Config file {} not found, using defaults",
                    config_path.display()
                );
                SyncConfig::default()
            }
            Err(e) => {
                warn!("{}; using default configuration", e);
                SyncConfig::default()
            }
        }
    }
}

/// Read and parse a config file. `Ok(None)` when the file does not exist.
/// `.json` files use the legacy JSON layout, everything else is TOML.
pub async fn read_config_file(config_path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    match fs::try_exists(config_path).await {
        Ok(true) => {}
        Ok(false) => return Ok(None),
        Err(e) => {
            return Err(ConfigError::LoadFailed {
                path: config_path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }

    let content = fs::read_to_string(config_path)
        .await
        .map_err(|e| ConfigError::LoadFailed {
            path: config_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let is_json = config_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str::<ConfigFile>(&content).map_err(|e| e.to_string())
    } else {
        toml::from_str::<ConfigFile>(&content).map_err(|e| e.to_string())
    };

    parsed
        .map(Some)
        .map_err(|reason| ConfigError::ParseError {
            path: config_path.to_path_buf(),
            reason,
        })
}

/// Create the data and backup directories (and parents). Safe to call repeatedly.
pub async fn ensure_directories(config: &SyncConfig) -> Result<(), ConfigError> {
    for dir in [&config.data_dir, &config.backup_dir] {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| ConfigError::DirectoryFailed {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
    }
    Ok(())
}
