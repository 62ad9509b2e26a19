use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Raw internal catalog CSV (`lp_id`, `room_name`, ...).
    pub raw_path: String,
    /// SQLite file holding the precomputed catalog.
    pub precomputed_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingConfig {
    /// Caps the number of matches returned per request; all when unset.
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    pub api: ApiConfig,
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}
