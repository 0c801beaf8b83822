//! Request validation.
//!
//! One pass over a decoded request, before any strategy logic runs. The first
//! violation is returned as `InvalidParameters` naming the offending field.
//! Validation never mutates the request.

use crate::config::EngineConfig;
use crate::domain::history::Ohlc;
use crate::domain::{HistorySeries, MarketState, WhichHistory};
use crate::error::EngineError;
use crate::request::{
    PositionSizing, QuantileRequest, QuantileSignals, QuantileSizing, ReturnRequest,
    StrategyRequest, ThresholdRequest, ThresholdType,
};
use crate::sizers::SizeBounds;

/// Validate every field of `request` against `config`.
pub fn validate_request(request: &StrategyRequest, config: &EngineConfig) -> Result<(), EngineError> {
    validate_market(request.market())?;
    match request {
        StrategyRequest::Threshold(r) => validate_threshold(r, config),
        StrategyRequest::Return(r) => validate_return(r, config),
        StrategyRequest::Quantile(r) => validate_quantile(r, config),
    }
}

/// Common checks shared by every strategy.
pub fn validate_market(market: &MarketState) -> Result<(), EngineError> {
    positive("forecast_price", market.forecast_price)?;
    positive("current_price", market.current_price)?;
    if !(market.current_position.is_finite() && market.current_position >= 0.0) {
        return Err(EngineError::invalid(
            "current_position",
            "current_position must be non-negative (long-only positions)",
        ));
    }
    non_negative("available_cash", market.available_cash)?;
    positive("initial_capital", market.initial_capital)?;
    Ok(())
}

fn validate_threshold(r: &ThresholdRequest, config: &EngineConfig) -> Result<(), EngineError> {
    non_negative("threshold_value", r.threshold_value)?;
    optional_positive("execution_size", r.execution_size)?;
    optional_count("window_history", r.window_history)?;
    optional_count("min_history_length", r.min_history_length)?;
    validate_history(&r.history, config)?;
    if r.threshold_type == ThresholdType::Atr {
        if let Some(ohlc) = r.history.ohlc() {
            validate_ohlc_lengths(&ohlc)?;
        }
    }
    Ok(())
}

fn validate_return(r: &ReturnRequest, config: &EngineConfig) -> Result<(), EngineError> {
    non_negative("threshold_value", r.threshold_value)?;
    optional_positive("execution_size", r.execution_size)?;
    validate_bounds(&r.bounds)?;
    optional_count("window_history", r.window_history)?;
    optional_count("min_history_length", r.min_history_length)?;
    validate_history(&r.history, config)?;
    if r.position_sizing == PositionSizing::Normalized {
        validate_return_series(&r.history, r.which_history)?;
    }
    Ok(())
}

fn validate_quantile(r: &QuantileRequest, config: &EngineConfig) -> Result<(), EngineError> {
    if r.window_history == 0 {
        return Err(EngineError::invalid(
            "window_history",
            "window_history must be positive",
        ));
    }
    validate_bands(&r.quantile_signals)?;
    optional_positive("execution_size", r.execution_size)?;
    validate_bounds(&r.bounds)?;
    optional_count("min_history_length", r.min_history_length)?;
    validate_history(&r.history, config)?;

    let ohlc = r.history.ohlc().ok_or_else(|| {
        EngineError::invalid(
            "ohlc_history",
            "All OHLC histories (open_history, high_history, low_history, close_history) \
             are required for quantile strategy",
        )
    })?;
    validate_ohlc_lengths(&ohlc)?;
    if r.position_sizing == QuantileSizing::Normalized {
        validate_return_series(&r.history, r.which_history)?;
    }
    Ok(())
}

fn validate_ohlc_lengths(ohlc: &Ohlc<'_>) -> Result<(), EngineError> {
    if ohlc.has_equal_lengths() {
        return Ok(());
    }
    Err(EngineError::invalid(
        "ohlc_history",
        format!(
            "All OHLC history arrays must have the same length. Found lengths: \
             open={}, high={}, low={}, close={}",
            ohlc.open.len(),
            ohlc.high.len(),
            ohlc.low.len(),
            ohlc.close.len()
        ),
    ))
}

/// A series fed to simple returns divides by each price, so every value must be > 0.
fn validate_return_series(history: &HistorySeries, which: WhichHistory) -> Result<(), EngineError> {
    let Some(values) = history.series(which) else {
        return Ok(());
    };
    match values.iter().position(|v| *v <= 0.0) {
        Some(i) => {
            let field = which.field_name();
            Err(EngineError::invalid(
                field,
                format!(
                    "{field}[{i}] must be positive for return-based sizing, got {}",
                    values[i]
                ),
            ))
        }
        None => Ok(()),
    }
}

/// Each supplied history array must be non-empty, bounded and finite.
pub fn validate_history(history: &HistorySeries, config: &EngineConfig) -> Result<(), EngineError> {
    for (which, values) in history.supplied() {
        let field = which.field_name();
        if values.is_empty() {
            return Err(EngineError::invalid(field, "History arrays cannot be empty"));
        }
        if values.len() > config.max_history_len {
            return Err(EngineError::invalid(
                field,
                format!(
                    "History arrays cannot exceed {} elements (got {})",
                    config.max_history_len,
                    values.len()
                ),
            ));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(EngineError::invalid(
                field,
                format!("{field}[{i}] must be a finite number, got {}", values[i]),
            ));
        }
    }
    Ok(())
}

fn validate_bands(signals: &QuantileSignals) -> Result<(), EngineError> {
    for band in signals.iter() {
        let (lo, hi) = (band.min(), band.max());
        if !(lo.is_finite() && hi.is_finite() && lo >= 0.0 && hi <= 100.0 && lo < hi) {
            return Err(EngineError::invalid(
                "quantile_signals",
                format!(
                    "quantile_signals[{}]['range'] must be [min, max] where 0 <= min < max <= 100",
                    band.key
                ),
            ));
        }
        if !(0.0..=1.0).contains(&band.multiplier) {
            return Err(EngineError::invalid(
                "quantile_signals",
                format!(
                    "quantile_signals[{}]['multiplier'] must be between 0 and 1",
                    band.key
                ),
            ));
        }
    }
    Ok(())
}

fn validate_bounds(bounds: &SizeBounds) -> Result<(), EngineError> {
    optional_positive("max_position_size", bounds.max_position_size)?;
    optional_positive("min_position_size", bounds.min_position_size)?;
    if !bounds.is_consistent() {
        return Err(EngineError::invalid(
            "position_size_constraints",
            "max_position_size must be >= min_position_size",
        ));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(
            field,
            format!("{field} must be a positive number, got {value}"),
        ))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(
            field,
            format!("{field} must be non-negative, got {value}"),
        ))
    }
}

fn optional_positive(field: &str, value: Option<f64>) -> Result<(), EngineError> {
    value.map_or(Ok(()), |v| positive(field, v))
}

fn optional_count(field: &str, value: Option<usize>) -> Result<(), EngineError> {
    match value {
        Some(0) => Err(EngineError::invalid(field, format!("{field} must be positive"))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Action;
    use crate::request::QuantileBand;

    fn market() -> MarketState {
        MarketState {
            forecast_price: 105.0,
            current_price: 100.0,
            current_position: 0.0,
            available_cash: 10_000.0,
            initial_capital: 10_000.0,
        }
    }

    fn threshold() -> ThresholdRequest {
        ThresholdRequest {
            market: market(),
            threshold_type: ThresholdType::Absolute,
            threshold_value: 0.0,
            execution_size: Some(10.0),
            which_history: WhichHistory::Close,
            window_history: None,
            min_history_length: None,
            history: HistorySeries::default(),
        }
    }

    fn quantile() -> QuantileRequest {
        QuantileRequest {
            market: market(),
            which_history: WhichHistory::Close,
            window_history: 5,
            quantile_signals: QuantileSignals(vec![QuantileBand {
                key: "top".into(),
                range: [90.0, 100.0],
                signal: Action::Buy,
                multiplier: 1.0,
            }]),
            position_sizing: QuantileSizing::Fixed,
            execution_size: None,
            bounds: SizeBounds::default(),
            min_history_length: None,
            history: HistorySeries::from_ohlc(vec![1.0; 5], vec![1.0; 5], vec![1.0; 5], vec![1.0; 5]),
        }
    }

    fn normalized_return() -> ReturnRequest {
        ReturnRequest {
            market: market(),
            position_sizing: PositionSizing::Normalized,
            threshold_value: 0.01,
            execution_size: None,
            bounds: SizeBounds::default(),
            which_history: WhichHistory::Close,
            window_history: None,
            min_history_length: None,
            history: HistorySeries::default(),
        }
    }

    fn check(request: impl Into<StrategyRequest>) -> Result<(), EngineError> {
        validate_request(&request.into(), &EngineConfig::default())
    }

    #[test]
    fn valid_request_passes() {
        assert!(check(threshold()).is_ok());
        assert!(check(quantile()).is_ok());
    }

    #[test]
    fn non_positive_prices_rejected() {
        let mut r = threshold();
        r.market.current_price = 0.0;
        assert_eq!(check(r).unwrap_err().parameter(), Some("current_price"));

        let mut r = threshold();
        r.market.forecast_price = -1.0;
        assert_eq!(check(r).unwrap_err().parameter(), Some("forecast_price"));

        let mut r = threshold();
        r.market.forecast_price = f64::NAN;
        assert_eq!(check(r).unwrap_err().parameter(), Some("forecast_price"));
    }

    #[test]
    fn negative_position_rejected() {
        let mut r = threshold();
        r.market.current_position = -1.0;
        assert_eq!(check(r).unwrap_err().parameter(), Some("current_position"));
    }

    #[test]
    fn zero_cash_and_position_are_valid() {
        let mut r = threshold();
        r.market.available_cash = 0.0;
        assert!(check(r).is_ok());
    }

    #[test]
    fn zero_initial_capital_rejected() {
        let mut r = threshold();
        r.market.initial_capital = 0.0;
        assert_eq!(check(r).unwrap_err().parameter(), Some("initial_capital"));
    }

    #[test]
    fn negative_threshold_rejected() {
        let mut r = threshold();
        r.threshold_value = -0.5;
        assert_eq!(check(r).unwrap_err().parameter(), Some("threshold_value"));
    }

    #[test]
    fn zero_execution_size_rejected() {
        let mut r = threshold();
        r.execution_size = Some(0.0);
        assert_eq!(check(r).unwrap_err().parameter(), Some("execution_size"));
    }

    #[test]
    fn zero_window_rejected() {
        let mut r = threshold();
        r.window_history = Some(0);
        assert_eq!(check(r).unwrap_err().parameter(), Some("window_history"));

        let mut q = quantile();
        q.window_history = 0;
        assert_eq!(check(q).unwrap_err().parameter(), Some("window_history"));
    }

    #[test]
    fn atr_without_ohlc_is_not_rejected() {
        let mut r = threshold();
        r.threshold_type = ThresholdType::Atr;
        r.history = HistorySeries::from_closes(vec![100.0, 101.0]);
        assert!(check(r).is_ok());
    }

    #[test]
    fn empty_history_rejected() {
        let mut r = threshold();
        r.history = HistorySeries::from_closes(vec![]);
        assert_eq!(check(r).unwrap_err().parameter(), Some("close_history"));
    }

    #[test]
    fn non_finite_history_rejected() {
        let mut r = threshold();
        r.history = HistorySeries::from_closes(vec![100.0, f64::INFINITY, 101.0]);
        assert_eq!(check(r).unwrap_err().parameter(), Some("close_history"));
    }

    #[test]
    fn zero_history_allowed_without_returns() {
        let mut r = threshold();
        r.threshold_type = ThresholdType::StdDev;
        r.history = HistorySeries::from_closes(vec![0.0, -1.0, 2.0]);
        assert!(check(r).is_ok());
    }

    #[test]
    fn zero_history_rejected_for_normalized_sizing() {
        let mut r = normalized_return();
        r.history = HistorySeries::from_closes(vec![100.0, 0.0, 101.0]);
        assert_eq!(check(r).unwrap_err().parameter(), Some("close_history"));

        let mut q = quantile();
        q.position_sizing = QuantileSizing::Normalized;
        q.history.close = Some(vec![1.0, 1.0, -2.0, 1.0, 1.0]);
        assert_eq!(check(q).unwrap_err().parameter(), Some("close_history"));
    }

    #[test]
    fn zero_history_in_other_series_allowed_for_normalized_sizing() {
        let mut r = normalized_return();
        r.which_history = WhichHistory::Open;
        r.history = HistorySeries::from_ohlc(
            vec![100.0, 101.0],
            vec![101.0, 102.0],
            vec![0.0, 100.0],
            vec![100.0, 101.0],
        );
        assert!(check(r).is_ok());
    }

    #[test]
    fn atr_requires_equal_lengths() {
        let mut r = threshold();
        r.threshold_type = ThresholdType::Atr;
        r.history = HistorySeries::from_ohlc(
            vec![1.0; 3],
            vec![2.0; 3],
            vec![0.5; 3],
            vec![1.0; 2],
        );
        assert_eq!(check(r).unwrap_err().parameter(), Some("ohlc_history"));
    }

    #[test]
    fn unequal_ohlc_ignored_for_absolute_threshold() {
        let mut r = threshold();
        r.history = HistorySeries::from_ohlc(
            vec![1.0; 3],
            vec![2.0; 3],
            vec![0.5; 3],
            vec![1.0; 2],
        );
        assert!(check(r).is_ok());
    }

    #[test]
    fn oversized_history_rejected() {
        let mut r = threshold();
        r.history = HistorySeries::from_closes(vec![1.0; 11]);
        let config = EngineConfig {
            max_history_len: 10,
            ..EngineConfig::default()
        };
        let err = validate_request(&r.into(), &config).unwrap_err();
        assert_eq!(err.parameter(), Some("close_history"));
    }

    #[test]
    fn inconsistent_bounds_rejected() {
        let r = ReturnRequest {
            market: market(),
            position_sizing: PositionSizing::Fixed,
            threshold_value: 0.01,
            execution_size: None,
            bounds: SizeBounds::new(Some(10.0), Some(5.0)),
            which_history: WhichHistory::Close,
            window_history: None,
            min_history_length: None,
            history: HistorySeries::default(),
        };
        let err = check(StrategyRequest::Return(r)).unwrap_err();
        assert_eq!(err.parameter(), Some("position_size_constraints"));
    }

    #[test]
    fn quantile_requires_all_ohlc() {
        let mut q = quantile();
        q.history.open = None;
        assert_eq!(check(q).unwrap_err().parameter(), Some("ohlc_history"));
    }

    #[test]
    fn quantile_requires_equal_lengths() {
        let mut q = quantile();
        q.history.low = Some(vec![1.0; 4]);
        assert_eq!(check(q).unwrap_err().parameter(), Some("ohlc_history"));
    }

    #[test]
    fn quantile_band_range_checked() {
        let mut q = quantile();
        q.quantile_signals.0[0].range = [60.0, 40.0];
        assert_eq!(check(q).unwrap_err().parameter(), Some("quantile_signals"));

        let mut q = quantile();
        q.quantile_signals.0[0].range = [0.0, 101.0];
        assert_eq!(check(q).unwrap_err().parameter(), Some("quantile_signals"));
    }

    #[test]
    fn quantile_multiplier_checked() {
        let mut q = quantile();
        q.quantile_signals.0[0].multiplier = 1.5;
        assert_eq!(check(q).unwrap_err().parameter(), Some("quantile_signals"));
    }
}
