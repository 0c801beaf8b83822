//! Engine configuration.
//!
//! Defaults for optional request fields and the history-length bound. The
//! config is passed explicitly into every entry point; nothing reads global
//! settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

/// Ambient defaults and bounds for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Trade size used when a request omits `execution_size`.
    pub default_execution_size: f64,
    /// Minimum history length used when a request omits `min_history_length`.
    pub default_min_history_length: usize,
    /// Trailing window used when a request omits `window_history`.
    pub default_window_history: usize,
    /// Upper bound on every history array.
    pub max_history_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_execution_size: 1.0,
            default_min_history_length: 2,
            default_window_history: 20,
            max_history_len: 10_000,
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_execution_size.is_finite() || self.default_execution_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "default_execution_size",
                message: format!("must be positive, got {}", self.default_execution_size),
            });
        }
        if self.default_min_history_length == 0 {
            return Err(ConfigError::Invalid {
                field: "default_min_history_length",
                message: "must be >= 1".into(),
            });
        }
        if self.default_window_history == 0 {
            return Err(ConfigError::Invalid {
                field: "default_window_history",
                message: "must be >= 1".into(),
            });
        }
        if self.max_history_len == 0 {
            return Err(ConfigError::Invalid {
                field: "max_history_len",
                message: "must be >= 1".into(),
            });
        }
        Ok(())
    }

    /// Deterministic hash of the config, for tagging decisions in logs.
    pub fn fingerprint(&self) -> String {
        // Field order is fixed by the struct, so the JSON is canonical.
        let json = serde_json::to_string(self).expect("EngineConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
