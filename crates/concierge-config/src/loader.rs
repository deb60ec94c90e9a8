//! Config file loading, environment overrides, and validation.

use crate::{ConciergeConfig, ConfigError};
use log::{debug, info, warn};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

impl ConciergeConfig {
    /// Load a single config from a JSON5 file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a single config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let config: ConciergeConfig = json5::from_str(contents)?;
        Ok(config)
    }

    /// Fill settings from the environment where the file left them unset.
    ///
    /// A file-provided API key wins over the environment; `PORT` always wins
    /// over the file because deploy targets inject it.
    pub fn apply_env_overrides(&mut self) {
        if self.provider.api_key.is_empty()
            && let Ok(key) = env::var(API_KEY_ENV)
        {
            debug!("using provider api key from {API_KEY_ENV}");
            self.provider.api_key = key;
        }
        if let Ok(raw) = env::var(PORT_ENV) {
            match raw.parse::<u16>() {
                Ok(port) => {
                    debug!("overriding listen port from {PORT_ENV} (port={port})");
                    self.server.port = port;
                }
                Err(_) => warn!("ignoring non-numeric {PORT_ENV} value: {raw}"),
            }
        }
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "provider.api_key".to_string(),
                message: format!("must be set (or export {API_KEY_ENV})"),
            });
        }
        if self.provider.max_tokens == 0 {
            return Err(ConfigError::InvalidField {
                path: "provider.max_tokens".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::InvalidField {
                path: "provider.temperature".to_string(),
                message: "must be between 0.0 and 2.0".to_string(),
            });
        }
        Ok(())
    }
}
