use crate::classifier::ClassifierConfig;
use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_url: String,
    pub link_base_url: String,
    pub cache_db_path: String,
    pub classifier: ClassifierConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_url: "https://gameboy.github.io/dmgAPI/json/market.json".to_string(),
            link_base_url:
                "discord://discordapp.com/channels/246604458744610816/336895311081373707/"
                    .to_string(),
            cache_db_path: "listings.db".to_string(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Loads configuration, falling back to the built-in defaults when the file
/// does not exist. The override table and keyword lists live here as data.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
