//! Spotlight configuration files
//!
//! A config file carries the overlay options and an optional theme:
//!
//! ```toml
//! [options]
//! padding_size = "small"
//! spotlight_clicks = true
//!
//! [theme.spotlight]
//! borderRadius = 8
//! ```
//!
//! Missing sections fall back to their defaults, and theme sections merge
//! key by key over the stock styles.

use std::path::Path;

use serde::{Deserialize, Serialize};
use spotlight_types::{SpotlightOptions, Theme};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotlightConfig {
    #[serde(default)]
    pub options: SpotlightOptions,
    #[serde(default)]
    pub theme: Theme,
}

impl SpotlightConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Load a config file from disk
pub fn load_config(path: &Path) -> Result<SpotlightConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let config = SpotlightConfig::from_toml_str(&content).map_err(|source| {
        ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), "loaded spotlight config");
    Ok(config)
}
