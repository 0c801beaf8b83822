//! Strategy catalog and service status.
//!
//! Static descriptions of the supported strategies, for front ends that list
//! them. Nothing here is consulted by the engine itself.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::request::StrategyType;

pub const SERVICE_NAME: &str = "trading-strategies";
pub const SERVICE_VERSION: &str = "1.0.0";

const COMMON_REQUIRED: [&str; 6] = [
    "strategy_type",
    "forecast_price",
    "current_price",
    "current_position",
    "available_cash",
    "initial_capital",
];

const OHLC_FIELDS: [&str; 4] = ["open_history", "high_history", "low_history", "close_history"];

/// Parameter lists for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyParameters {
    pub required: Vec<&'static str>,
    pub optional: Vec<&'static str>,
    /// Mode → extra requirement, in display order.
    #[serde(serialize_with = "serialize_pairs", skip_serializing_if = "Vec::is_empty")]
    pub conditional: Vec<(&'static str, &'static str)>,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyInfo {
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub description: &'static str,
    pub parameters: StrategyParameters,
}

/// Service health summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub available_strategies: Vec<StrategyType>,
}

fn serialize_pairs<S: Serializer>(
    pairs: &[(&'static str, &'static str)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

fn with_common(extra: &[&'static str]) -> Vec<&'static str> {
    COMMON_REQUIRED.iter().chain(extra).copied().collect()
}

impl StrategyInfo {
    pub fn for_type(strategy_type: StrategyType) -> Self {
        match strategy_type {
            StrategyType::Threshold => Self {
                strategy_type,
                description: "Threshold-based strategy with configurable threshold types \
                              (absolute, percentage, std_dev, ATR)",
                parameters: StrategyParameters {
                    required: with_common(&["threshold_type"]),
                    optional: [
                        "threshold_value",
                        "execution_size",
                        "which_history",
                        "window_history",
                        "min_history_length",
                    ]
                    .into_iter()
                    .chain(OHLC_FIELDS)
                    .collect(),
                    conditional: vec![
                        ("atr", "All OHLC histories required"),
                        ("std_dev", "One of OHLC histories required"),
                    ],
                },
            },
            StrategyType::Return => Self {
                strategy_type,
                description: "Return-based strategy with position sizing options \
                              (fixed, proportional, normalized)",
                parameters: StrategyParameters {
                    required: with_common(&["position_sizing", "threshold_value"]),
                    optional: [
                        "execution_size",
                        "max_position_size",
                        "min_position_size",
                        "which_history",
                        "window_history",
                        "min_history_length",
                    ]
                    .into_iter()
                    .chain(OHLC_FIELDS)
                    .collect(),
                    conditional: vec![(
                        "normalized",
                        "History data required for normalized position sizing",
                    )],
                },
            },
            StrategyType::Quantile => Self {
                strategy_type,
                description: "Quantile-based strategy using empirical quantiles \
                              from historical distribution",
                parameters: StrategyParameters {
                    required: with_common(&[
                        "which_history",
                        "window_history",
                        "quantile_signals",
                        "open_history",
                        "high_history",
                        "low_history",
                        "close_history",
                    ]),
                    optional: vec![
                        "position_sizing",
                        "execution_size",
                        "max_position_size",
                        "min_position_size",
                        "min_history_length",
                    ],
                    conditional: Vec::new(),
                },
            },
        }
    }
}

/// Every supported strategy, in tag order.
pub fn strategy_catalog() -> Vec<StrategyInfo> {
    StrategyType::ALL.into_iter().map(StrategyInfo::for_type).collect()
}

pub fn service_status() -> ServiceStatus {
    ServiceStatus {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        available_strategies: StrategyType::ALL.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_lists_every_strategy() {
        let catalog = strategy_catalog();
        let types: Vec<StrategyType> = catalog.iter().map(|s| s.strategy_type).collect();
        assert_eq!(types, StrategyType::ALL.to_vec());
    }

    #[test]
    fn every_entry_requires_common_fields() {
        for info in strategy_catalog() {
            for field in COMMON_REQUIRED {
                assert!(
                    info.parameters.required.contains(&field),
                    "{} missing {field}",
                    info.strategy_type
                );
            }
        }
    }

    #[test]
    fn quantile_requires_ohlc() {
        let info = StrategyInfo::for_type(StrategyType::Quantile);
        for field in OHLC_FIELDS {
            assert!(info.parameters.required.contains(&field));
        }
        assert!(info.parameters.conditional.is_empty());
    }

    #[test]
    fn catalog_json_shape() {
        let value = serde_json::to_value(StrategyInfo::for_type(StrategyType::Threshold)).unwrap();
        assert_eq!(value["type"], "threshold");
        assert_eq!(
            value["parameters"]["conditional"],
            json!({"atr": "All OHLC histories required", "std_dev": "One of OHLC histories required"})
        );

        let quantile = serde_json::to_value(StrategyInfo::for_type(StrategyType::Quantile)).unwrap();
        assert!(quantile["parameters"].get("conditional").is_none());
    }

    #[test]
    fn status_json() {
        let value = serde_json::to_value(service_status()).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "healthy",
                "service": "trading-strategies",
                "version": "1.0.0",
                "available_strategies": ["threshold", "return", "quantile"]
            })
        );
    }
}
