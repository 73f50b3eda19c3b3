use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::money::DEFAULT_CURRENCY_SYMBOL;
use crate::core::services::{DEFAULT_EXPIRY_WINDOW_DAYS, MAX_EXPIRY_WINDOW_DAYS};
use crate::errors::{FleetError, FleetResult};
use crate::store::json_backend::{tmp_path, write_file};
use crate::utils;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub expiry_window_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            expiry_window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
            data_dir: None,
        }
    }
}

impl Config {
    /// Where the vehicle and trip collections live.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(utils::default_data_dir)
    }

    fn validate(&self) -> FleetResult<()> {
        if !(1..=MAX_EXPIRY_WINDOW_DAYS).contains(&self.expiry_window_days) {
            return Err(FleetError::Config(format!(
                "expiry_window_days must be between 1 and {MAX_EXPIRY_WINDOW_DAYS}, got {}",
                self.expiry_window_days
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::at(utils::config_file())
    }

    pub fn with_base_dir(base: &Path) -> Self {
        Self::at(utils::config_file_in(base))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file; a missing file yields defaults.
    pub fn load(&self) -> FleetResult<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> FleetResult<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
