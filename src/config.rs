use crate::analyzer::RsiSettings;
use crate::model::ConfigError;
use crate::normalizer::normalize_all;
use crate::presenter::OutputFormat;
use crate::provider::fetcher::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::fs;

pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";
pub const SUPPORTED_INTERVALS: [&str; 5] = ["1min", "5min", "15min", "30min", "60min"];

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_interval")]
    pub interval: String,
    pub symbols: Vec<String>,
    /// `None` runs once; otherwise the analysis repeats on this period.
    #[serde(default)]
    pub check_interval_seconds: Option<u64>,
    #[serde(default)]
    pub rsi: RsiSettings,
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_interval() -> String {
    "5min".to_string()
}

impl AppConfig {
    /// A key from the environment takes precedence over the file.
    pub fn apply_env_key(&mut self, env_key: Option<String>) {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.symbols = normalize_all(&self.symbols);
        if self.symbols.is_empty() {
            return Err(ConfigError::Invalid("no symbols configured".into()));
        }
        if !SUPPORTED_INTERVALS.contains(&self.interval.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unsupported interval {:?}, expected one of {}",
                self.interval,
                SUPPORTED_INTERVALS.join(", ")
            )));
        }
        if self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "missing api_key (set it in the file or via {API_KEY_ENV})"
            )));
        }
        if self.check_interval_seconds == Some(0) {
            return Err(ConfigError::Invalid("check_interval_seconds must be positive".into()));
        }
        if let RsiSettings::Wilder { period: 0 } = self.rsi {
            return Err(ConfigError::Invalid("rsi period must be positive".into()));
        }
        Ok(())
    }
}

pub fn parse_config(content: &str, env_key: Option<String>) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = serde_json::from_str(content)?;
    config.apply_env_key(env_key);
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, std::env::var(API_KEY_ENV).ok())
}
