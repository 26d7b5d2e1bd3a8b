//! Configuration management
//!
//! Priority for the API URL: CLI argument > SCHOOL_API_URL environment
//! variable > config.toml

use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const API_URL_ENV: &str = "SCHOOL_API_URL";
const APP_DIR_NAME: &str = "school-cli";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// School API server URL
    pub api_url: Option<String>,
    /// Base directory for downloaded documents
    pub receipts_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;

        Ok(home_dir
            .join(".config")
            .join(APP_DIR_NAME)
            .join("config.toml"))
    }

    /// Get API URL with fallback to environment variable
    pub fn get_api_url(&self) -> Option<String> {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.api_url.clone())
    }

    pub fn set_api_url(&mut self, url: String) {
        self.api_url = Some(url);
    }

    /// Directory receipts are stored under; defaults to the platform data dir
    pub fn receipts_base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.receipts_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(StorageError::ConfigDirNotFound)
    }
}
