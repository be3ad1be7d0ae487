//! Run configuration.
//!
//! Resolved once before the pipeline starts; the pipeline itself never
//! touches the environment or disk.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub warehouse: WarehouseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Sensitivity-zone API endpoint.
    pub api_url: String,
    /// Reverse-geocoding endpoint.
    #[serde(default = "default_geocoder_url")]
    pub geocoder_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WarehouseConfig {
    /// Destination project (database name).
    pub project: String,
    /// Destination dataset (schema); the table inside is always `data`.
    pub dataset: String,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    /// Falls back to PGPASSWORD when unset.
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: None,
        }
    }
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "postgres".to_string()
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            [source]
            api_url = "https://biodiv-sports.fr/api/v2/sensitivearea/"

            [warehouse]
            project = "biodiv"
            dataset = "biodiv_sports"
            "#,
        )
        .unwrap();

        assert_eq!(config.warehouse.dataset, "biodiv_sports");
        assert_eq!(config.warehouse.database.port, 5432);
        assert_eq!(
            config.source.geocoder_url,
            "https://nominatim.openstreetmap.org"
        );
    }
}
