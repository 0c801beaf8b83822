//! Strategy requests: one tagged variant per strategy family.
//!
//! The wire format is a flat JSON object discriminated by `strategy_type`.
//! Decoding goes through [`StrategyRequest::from_value`] so an unknown tag
//! surfaces as `InvalidStrategy` and every other decode failure as
//! `InvalidParameters`. After decoding, nothing in the engine compares
//! strings: every mode is an enum.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::config::EngineConfig;
use crate::domain::{Action, HistorySeries, MarketState, WhichHistory};
use crate::error::EngineError;
use crate::sizers::SizeBounds;

// ─── Mode enums ──────────────────────────────────────────────────────

/// Strategy family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    Threshold,
    Return,
    Quantile,
}

impl StrategyType {
    pub const ALL: [StrategyType; 3] = [Self::Threshold, Self::Return, Self::Quantile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Return => "return",
            Self::Quantile => "quantile",
        }
    }

    /// Case-insensitive lookup of a wire tag.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the threshold strategy derives its trigger level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdType {
    Absolute,
    Percentage,
    StdDev,
    Atr,
}

impl ThresholdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Percentage => "percentage",
            Self::StdDev => "std_dev",
            Self::Atr => "atr",
        }
    }
}

/// Position sizing for the return strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSizing {
    #[default]
    Fixed,
    Proportional,
    Normalized,
}

/// Position sizing for the quantile strategy (proportional is not offered).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantileSizing {
    #[default]
    Fixed,
    Normalized,
}

// ─── Variant payloads ────────────────────────────────────────────────

/// Threshold strategy: trade `execution_size` when |forecast - price| clears a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRequest {
    #[serde(flatten)]
    pub market: MarketState,
    pub threshold_type: ThresholdType,
    #[serde(default)]
    pub threshold_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_size: Option<f64>,
    #[serde(default)]
    pub which_history: WhichHistory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_history: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_history_length: Option<usize>,
    #[serde(flatten)]
    pub history: HistorySeries,
}

/// Return strategy: trade when the expected return leaves a symmetric band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRequest {
    #[serde(flatten)]
    pub market: MarketState,
    pub position_sizing: PositionSizing,
    pub threshold_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_size: Option<f64>,
    #[serde(flatten)]
    pub bounds: SizeBounds,
    #[serde(default)]
    pub which_history: WhichHistory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_history: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_history_length: Option<usize>,
    #[serde(flatten)]
    pub history: HistorySeries,
}

/// Quantile strategy: act on where the forecast ranks within recent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileRequest {
    #[serde(flatten)]
    pub market: MarketState,
    pub which_history: WhichHistory,
    pub window_history: usize,
    pub quantile_signals: QuantileSignals,
    #[serde(default)]
    pub position_sizing: QuantileSizing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_size: Option<f64>,
    #[serde(flatten)]
    pub bounds: SizeBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_history_length: Option<usize>,
    #[serde(flatten)]
    pub history: HistorySeries,
}

macro_rules! resolved_defaults {
    ($ty:ty) => {
        impl $ty {
            pub fn execution_size(&self, config: &EngineConfig) -> f64 {
                self.execution_size
                    .unwrap_or(config.default_execution_size)
            }

            pub fn min_history_length(&self, config: &EngineConfig) -> usize {
                self.min_history_length
                    .unwrap_or(config.default_min_history_length)
            }
        }
    };
}

resolved_defaults!(ThresholdRequest);
resolved_defaults!(ReturnRequest);
resolved_defaults!(QuantileRequest);

impl ThresholdRequest {
    pub fn window_history(&self, config: &EngineConfig) -> usize {
        self.window_history.unwrap_or(config.default_window_history)
    }
}

impl ReturnRequest {
    pub fn window_history(&self, config: &EngineConfig) -> usize {
        self.window_history.unwrap_or(config.default_window_history)
    }
}

// ─── Quantile bands ──────────────────────────────────────────────────

/// One `quantile_signals` entry: a percentile range mapped to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileBand {
    /// Caller-chosen key; only used in messages.
    #[serde(skip)]
    pub key: String,
    /// `[min, max]` percentiles, `0 <= min < max <= 100`.
    pub range: [f64; 2],
    pub signal: Action,
    /// Fraction of cash (buy) or position (sell) to commit, in `[0, 1]`.
    pub multiplier: f64,
}

impl QuantileBand {
    pub fn min(&self) -> f64 {
        self.range[0]
    }

    pub fn max(&self) -> f64 {
        self.range[1]
    }

    /// Half-open `[min, max)` membership; a band ending at 100 also holds 100.
    pub fn contains(&self, percentile: f64) -> bool {
        let (lo, hi) = (self.min(), self.max());
        (lo <= percentile && percentile < hi) || (hi >= 100.0 && percentile == hi)
    }
}

/// Ordered `quantile_signals` mapping. Caller order is preserved because the
/// first matching band wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantileSignals(pub Vec<QuantileBand>);

impl QuantileSignals {
    pub fn iter(&self) -> impl Iterator<Item = &QuantileBand> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First band, in caller order, containing `percentile`.
    pub fn first_match(&self, percentile: f64) -> Option<&QuantileBand> {
        self.0.iter().find(|band| band.contains(percentile))
    }
}

impl FromIterator<QuantileBand> for QuantileSignals {
    fn from_iter<I: IntoIterator<Item = QuantileBand>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for QuantileSignals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for band in &self.0 {
            map.serialize_entry(&band.key, band)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QuantileSignals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BandsVisitor;

        impl<'de> Visitor<'de> for BandsVisitor {
            type Value = QuantileSignals;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of key -> {range, signal, multiplier}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut bands = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, mut band)) = access.next_entry::<String, QuantileBand>()? {
                    band.key = key;
                    bands.push(band);
                }
                Ok(QuantileSignals(bands))
            }
        }

        deserializer.deserialize_map(BandsVisitor)
    }
}

// ─── Tagged request ──────────────────────────────────────────────────

/// A fully decoded strategy request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy_type", rename_all = "lowercase")]
pub enum StrategyRequest {
    Threshold(ThresholdRequest),
    Return(ReturnRequest),
    Quantile(QuantileRequest),
}

impl StrategyRequest {
    /// Decode a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| EngineError::invalid("request", format!("malformed JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Decode a request from a JSON value, classifying failures.
    pub fn from_value(mut value: Value) -> Result<Self, EngineError> {
        let object = value
            .as_object_mut()
            .ok_or_else(|| EngineError::invalid("request", "expected a JSON object"))?;

        let tag = match object.get("strategy_type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => return Err(EngineError::unknown_strategy(other.to_string())),
            None => {
                return Err(EngineError::invalid(
                    "strategy_type",
                    "missing required parameter: strategy_type",
                ))
            }
        };
        let strategy_type =
            StrategyType::parse(&tag).ok_or_else(|| EngineError::unknown_strategy(tag))?;
        object.insert("strategy_type".into(), Value::from(strategy_type.as_str()));

        serde_json::from_value(value).map_err(|e| {
            let message = e.to_string();
            let field = offending_field(&message).unwrap_or("request").to_string();
            EngineError::invalid(field, message)
        })
    }

    pub fn strategy_type(&self) -> StrategyType {
        match self {
            Self::Threshold(_) => StrategyType::Threshold,
            Self::Return(_) => StrategyType::Return,
            Self::Quantile(_) => StrategyType::Quantile,
        }
    }

    pub fn market(&self) -> &MarketState {
        match self {
            Self::Threshold(r) => &r.market,
            Self::Return(r) => &r.market,
            Self::Quantile(r) => &r.market,
        }
    }

    pub fn history(&self) -> &HistorySeries {
        match self {
            Self::Threshold(r) => &r.history,
            Self::Return(r) => &r.history,
            Self::Quantile(r) => &r.history,
        }
    }
}

macro_rules! impl_from_variant {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for StrategyRequest {
            fn from(request: $ty) -> Self {
                Self::$variant(request)
            }
        }
    };
}

impl_from_variant!(Threshold, ThresholdRequest);
impl_from_variant!(Return, ReturnRequest);
impl_from_variant!(Quantile, QuantileRequest);

/// Field name from serde's "missing field `x`" / "unknown field `x`" messages.
fn offending_field(message: &str) -> Option<&str> {
    let rest = message
        .strip_prefix("missing field `")
        .or_else(|| message.strip_prefix("unknown field `"))?;
    rest.split('`').next()
}
