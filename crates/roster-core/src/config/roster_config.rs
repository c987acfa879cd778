//! Top-level roster configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EventsConfig, MatchingConfig, ObservabilityConfig};
use crate::errors::ConfigError;

/// Configuration for one pipeline run. Every section is optional in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RosterConfig {
    pub matching: MatchingConfig,
    pub events: EventsConfig,
    pub observability: ObservabilityConfig,
}

impl RosterConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded roster config");
        Ok(config)
    }

    fn parse(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: RosterConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching
            .validate()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "matching".to_string(),
                message: e.to_string(),
            })?;
        if self.observability.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
