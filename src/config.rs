use crate::model::{ConfigError, VehicleInfo};
use serde::Deserialize;
use std::fs;

fn default_base_url() -> String {
    "https://serpapi.com/search".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_max_results() -> usize {
    12
}

/// One configured search to run: a free-text term, a vehicle scope, an image
/// of the part, or any combination.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    pub query: Option<String>,
    #[serde(default)]
    pub vehicle: VehicleInfo,
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub serpapi_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Whether to fall back to clearly-flagged demo results when the live
    /// API is unavailable. Demo data is never mixed with live results.
    #[serde(default)]
    pub demo_fallback: bool,
    pub searches: Vec<SearchConfig>,
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = serde_json::from_str(&content)?;

    // Environment takes precedence over the file, matching deployment setups
    // where the key is injected rather than committed.
    if let Ok(key) = std::env::var("SERPAPI_KEY") {
        if !key.is_empty() {
            config.serpapi_key = Some(key);
        }
    }

    Ok(config)
}
