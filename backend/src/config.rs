//! # Application Configuration
//!
//! Settings live in a single YAML file:
//!
//! ```yaml
//! data_directory: "/home/user/.local/share/charity-tracker"
//! storage_key: "transactions"
//! month_window: 6
//! locale: tr
//! ```
//!
//! Every field is optional; missing fields take their defaults. A missing
//! file means "all defaults".

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::aggregation::DEFAULT_MONTH_WINDOW;
use crate::domain::{Locale, ReportingConfig};
use crate::storage::DEFAULT_STORAGE_KEY;

const APP_DIRECTORY_NAME: &str = "charity-tracker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the store files
    pub data_directory: PathBuf,
    /// Store key of the transaction list
    pub storage_key: String,
    /// Trailing months in the dashboard trend chart
    pub month_window: usize,
    pub locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            month_window: DEFAULT_MONTH_WINDOW,
            locale: Locale::default(),
        }
    }
}

/// Platform data directory for the app, or `./data` when there is none
pub fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIRECTORY_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl AppConfig {
    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save settings to `path` (temp file + rename)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let yaml_content = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)
            .with_context(|| format!("Failed to write config file {:?}", temp_path))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace config file {:?}", path))?;

        debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn reporting(&self) -> ReportingConfig {
        ReportingConfig {
            month_window: self.month_window,
            locale: self.locale,
        }
    }
}
