//! Engine configuration

use crate::EngineError;
use fos_html::ObjectConfig;
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default `tracing` filter directive for [`crate::init_logging`]
    pub log_filter: String,
    /// `<object>` element behaviour
    pub object: ObjectConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            object: ObjectConfig::default(),
        }
    }
}

impl Config {
    /// Parse a JSON configuration. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}
