//! TOML configuration shared by the binaries.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::GeoJsonOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
    #[serde(default = "default_code_property")]
    pub code_property: String,
    #[serde(default = "default_name_property")]
    pub name_property: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DecodeConfig {
    /// Scan countries on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_code_property() -> String {
    "ISO_A3".to_string()
}

fn default_name_property() -> Option<String> {
    Some("ADMIN".to_string())
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

impl DatasetConfig {
    /// An empty `name_property` disables name lookup
    pub fn geojson_options(&self) -> GeoJsonOptions {
        GeoJsonOptions {
            code_property: self.code_property.clone(),
            name_property: self.name_property.clone().filter(|key| !key.is_empty()),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }
}
