//! Configuration types for the alert compiler

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Link back to the rule source, copied into every payload
    #[serde(default)]
    pub generator_url: String,
    #[serde(default)]
    pub empty_hits: EmptyHitsPolicy,
    /// Connection used when a sample message carries none
    #[serde(default)]
    pub es: Option<EsConfig>,
}

/// What to do when the fetcher returns no documents for a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHitsPolicy {
    /// Fail the compilation with `AlertError::NoHits`
    #[default]
    Error,
    /// Compile with every extracted field left empty
    EmptyFields,
}

/// Elasticsearch connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsConfig {
    #[serde(default = "default_addresses")]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            addresses: default_addresses(),
            username: None,
            password: None,
            version: default_version(),
        }
    }
}

fn default_addresses() -> Vec<String> {
    vec!["http://localhost:9200".to_string()]
}

fn default_version() -> String {
    "7".to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::AlertError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
