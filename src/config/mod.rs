//! # Configuration Management Module
//!
//! Type-safe configuration for warpkeep with serde serialization, sensible
//! defaults, and a bundled template (`config.example.toml`) that mirrors
//! [`Config::default()`].
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//!
//! [warps]
//! visit_reset_minutes = 60
//! page_size = 45
//! max_name_length = 24
//!
//! [warps.prices]
//! 1 = 100
//! 2 = 250
//! 3 = 500
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Price ordinals are TOML table keys, so they arrive as strings; keys that
//! do not parse as positive integers are dropped with a warning rather than
//! failing the whole load.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::validation::WarpNameRules;
use crate::warps::PriceTable;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub warps: WarpsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarpsConfig {
    /// Minutes between bulk resets of the visit window.
    #[serde(default = "default_visit_reset_minutes")]
    pub visit_reset_minutes: u64,
    /// Warps shown per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Longest warp name the purchase flow accepts.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    /// Ordinal -> price in coins. A missing ordinal is not purchasable,
    /// which is how servers cap warps per player.
    #[serde(default)]
    pub prices: BTreeMap<String, u32>,
}

fn default_visit_reset_minutes() -> u64 {
    60
}

fn default_page_size() -> usize {
    45
}

fn default_max_name_length() -> usize {
    24
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for WarpsConfig {
    fn default() -> Self {
        let mut prices = BTreeMap::new();
        prices.insert("1".to_string(), 100);
        prices.insert("2".to_string(), 250);
        prices.insert("3".to_string(), 500);
        Self {
            visit_reset_minutes: default_visit_reset_minutes(),
            page_size: default_page_size(),
            max_name_length: default_max_name_length(),
            prices,
        }
    }
}

impl WarpsConfig {
    /// Visit window period as a [`Duration`].
    pub fn reset_period(&self) -> Duration {
        Duration::from_secs(self.visit_reset_minutes.max(1) * 60)
    }

    /// Build the pure price table from the configured map. Keys that do not
    /// parse as positive integers are skipped with a warning.
    pub fn price_table(&self) -> PriceTable {
        self.prices
            .iter()
            .filter_map(|(key, price)| match key.parse::<u32>() {
                Ok(ordinal) if ordinal > 0 => Some((ordinal, *price)),
                _ => {
                    warn!("ignoring price entry with non-ordinal key '{}'", key);
                    None
                }
            })
            .collect()
    }

    /// Name rules for the purchase and rename flows.
    pub fn name_rules(&self) -> WarpNameRules {
        WarpNameRules::default().with_max_length(self.max_name_length)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate();
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Path of the sled database holding warp records.
    pub fn warps_db_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join("warps")
    }

    /// Sanity-check the price table. Gaps are legal (the first unconfigured
    /// ordinal is the purchase ceiling) but a table that never prices
    /// ordinal 1 means nobody can ever buy a warp, which is worth a warning.
    fn validate(&self) {
        let table = self.warps.price_table();
        if table.is_empty() {
            warn!("no warp prices configured; purchases are disabled");
        } else if table.price_for(1).is_none() {
            warn!("warp price table has no entry for ordinal 1; nobody can buy a first warp");
        }
        if self.warps.page_size == 0 {
            warn!("page_size of 0 is treated as 1; listings will be one warp per page");
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                data_dir: "./data".to_string(),
            },
            warps: WarpsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
