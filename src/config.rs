use std::fs;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::find_config_file;

/// Optional defaults from `keymint.toml`, discovered by walking up from
/// the current directory. CLI flags always win over these.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generate: GenerateDefaults,
    pub sampler: SamplerConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateDefaults {
    pub count: Option<u32>,
    pub exclude_similar: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub max_retries: Option<u32>,
}

impl Config {
    /// Load the nearest config file, or defaults when none exists.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}
