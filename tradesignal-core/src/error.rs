//! Engine error taxonomy.
//!
//! Every error is a deterministic input problem detected before any state
//! change. Business outcomes (cannot afford, nothing to sell, stopped) are not
//! errors: they come back as ordinary `ExecutionResult`s.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::request::StrategyType;

/// Errors surfaced synchronously by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed or out-of-range field, mismatched history lengths,
    /// bad `quantile_signals` entry.
    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameters { parameter: String, message: String },

    /// Unrecognized `strategy_type` tag.
    #[error("unknown strategy type: {strategy_type}")]
    InvalidStrategy { strategy_type: String },
}

impl EngineError {
    pub fn invalid(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    pub fn unknown_strategy(strategy_type: impl Into<String>) -> Self {
        Self::InvalidStrategy {
            strategy_type: strategy_type.into(),
        }
    }

    /// Machine-readable error code for API consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameters { .. } => "INVALID_PARAMETERS_ERROR",
            Self::InvalidStrategy { .. } => "INVALID_STRATEGY_ERROR",
        }
    }

    /// HTTP status the transport layer should map this error to.
    pub fn suggested_status_code(&self) -> u16 {
        400
    }

    /// The offending field, when the error names one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidParameters { parameter, .. } => Some(parameter),
            Self::InvalidStrategy { .. } => None,
        }
    }

    /// Structured context for the error body.
    pub fn details(&self) -> Map<String, Value> {
        let mut details = Map::new();
        match self {
            Self::InvalidParameters { parameter, .. } => {
                details.insert("parameter".into(), json!(parameter));
            }
            Self::InvalidStrategy { strategy_type } => {
                details.insert("strategy_type".into(), json!(strategy_type));
                let valid: Vec<&str> = StrategyType::ALL.iter().map(|s| s.as_str()).collect();
                details.insert("valid_strategies".into(), json!(valid));
            }
        }
        details
    }

    /// `{error, message, details}` body for an API or CLI response.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "details": Value::Object(self.details()),
        })
    }
}
