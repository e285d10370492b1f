//! Configuration management
//!
//! Compatible with the deployment settings.json format:
//! ```json
//! {
//!   "engine": { "commissionRate": "0.02", "quotesUrl": "...", "httpTimeoutSecs": 30 },
//!   ...
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default daily-quotes feed endpoint
pub const DEFAULT_QUOTES_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    engine: EngineSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngineSettings {
    #[serde(default)]
    commission_rate: Option<Decimal>,
    #[serde(default)]
    quotes_url: Option<String>,
    #[serde(default)]
    http_timeout_secs: Option<u64>,
}

/// Engine configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Share of a cross-user transfer charged as commission
    pub commission_rate: Decimal,
    /// Daily-quotes feed endpoint
    pub quotes_url: String,
    /// Timeout for quote feed requests
    pub http_timeout_secs: u64,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commission_rate: Decimal::new(2, 2),
            quotes_url: DEFAULT_QUOTES_URL.to_string(),
            http_timeout_secs: 30,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from a data directory
    ///
    /// Values can be overridden via `LEDGERLINE_COMMISSION_RATE` and
    /// `LEDGERLINE_QUOTES_URL` (for CI/testing).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let defaults = Self::default();

        let commission_rate = std::env::var("LEDGERLINE_COMMISSION_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(raw.engine.commission_rate)
            .unwrap_or(defaults.commission_rate);

        let quotes_url = std::env::var("LEDGERLINE_QUOTES_URL")
            .ok()
            .or_else(|| raw.engine.quotes_url.clone())
            .unwrap_or(defaults.quotes_url);

        let http_timeout_secs = raw
            .engine
            .http_timeout_secs
            .unwrap_or(defaults.http_timeout_secs);

        Ok(Self {
            commission_rate,
            quotes_url,
            http_timeout_secs,
            _raw_settings: raw,
        })
    }

    /// Save config to a data directory
    /// Preserves settings sections the engine doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.engine.commission_rate = Some(self.commission_rate);
        settings.engine.quotes_url = Some(self.quotes_url.clone());
        settings.engine.http_timeout_secs = Some(self.http_timeout_secs);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
