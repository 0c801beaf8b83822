//! Price history: four optional parallel OHLC sequences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which OHLC sequence a calculation reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhichHistory {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl WhichHistory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        }
    }

    /// Request field name carrying this sequence.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Open => "open_history",
            Self::High => "high_history",
            Self::Low => "low_history",
            Self::Close => "close_history",
        }
    }
}

impl fmt::Display for WhichHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OHLC history as supplied by the caller, oldest first.
///
/// Each sequence is optional on the wire. ATR and the quantile strategy need
/// all four with equal length; std-dev thresholds and normalized sizing need
/// only the selected one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    #[serde(rename = "open_history", default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Vec<f64>>,
    #[serde(rename = "high_history", default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Vec<f64>>,
    #[serde(rename = "low_history", default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Vec<f64>>,
    #[serde(rename = "close_history", default, skip_serializing_if = "Option::is_none")]
    pub close: Option<Vec<f64>>,
}

/// Borrowed view of a complete OHLC set.
#[derive(Debug, Clone, Copy)]
pub struct Ohlc<'a> {
    pub open: &'a [f64],
    pub high: &'a [f64],
    pub low: &'a [f64],
    pub close: &'a [f64],
}

impl Ohlc<'_> {
    /// Shortest of the four lengths.
    pub fn min_len(&self) -> usize {
        self.open
            .len()
            .min(self.high.len())
            .min(self.low.len())
            .min(self.close.len())
    }

    pub fn has_equal_lengths(&self) -> bool {
        let n = self.open.len();
        self.high.len() == n && self.low.len() == n && self.close.len() == n
    }
}

impl HistorySeries {
    /// Build a complete OHLC history.
    pub fn from_ohlc(open: Vec<f64>, high: Vec<f64>, low: Vec<f64>, close: Vec<f64>) -> Self {
        Self {
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
        }
    }

    /// Build a history carrying only closes.
    pub fn from_closes(close: Vec<f64>) -> Self {
        Self {
            close: Some(close),
            ..Self::default()
        }
    }

    /// The selected sequence, if supplied.
    pub fn series(&self, which: WhichHistory) -> Option<&[f64]> {
        match which {
            WhichHistory::Open => self.open.as_deref(),
            WhichHistory::High => self.high.as_deref(),
            WhichHistory::Low => self.low.as_deref(),
            WhichHistory::Close => self.close.as_deref(),
        }
    }

    /// All four sequences, or `None` if any is missing.
    pub fn ohlc(&self) -> Option<Ohlc<'_>> {
        Some(Ohlc {
            open: self.open.as_deref()?,
            high: self.high.as_deref()?,
            low: self.low.as_deref()?,
            close: self.close.as_deref()?,
        })
    }

    /// Supplied sequences paired with their request field names.
    pub fn supplied(&self) -> impl Iterator<Item = (WhichHistory, &[f64])> {
        [
            WhichHistory::Open,
            WhichHistory::High,
            WhichHistory::Low,
            WhichHistory::Close,
        ]
        .into_iter()
        .filter_map(move |which| self.series(which).map(|s| (which, s)))
    }
}

/// The trailing `window` points of `values` (all of them if shorter).
pub fn trailing(values: &[f64], window: usize) -> &[f64] {
    &values[values.len().saturating_sub(window)..]
}
