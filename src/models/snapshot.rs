//! Computed snapshot models.
//!
//! Every indicator has a named destination field, so adding an indicator
//! means adding a field here and an assignment in the aggregator.

use serde::{Deserialize, Serialize};

use super::Timeframe;

/// Indicator vectors for one timeframe.
///
/// In full form each non-empty vector is aligned index-for-index with the
/// candle series it was computed from (warm-up entries are `0.0`). A vector
/// is empty when the series is shorter than the indicator's warm-up or when
/// the indicator is not computed for the timeframe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub close: Vec<f64>,
    pub ema5: Vec<f64>,
    pub ema20: Vec<f64>,
    pub ema50: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_hist: Vec<f64>,
    pub rsi7: Vec<f64>,
    pub rsi14: Vec<f64>,
    pub adx7: Vec<f64>,
    pub adx14: Vec<f64>,
}

impl IndicatorSeries {
    /// Keeps only the most recent `k` points of every vector.
    #[must_use]
    pub fn tail(mut self, k: usize) -> Self {
        for values in [
            &mut self.close,
            &mut self.ema5,
            &mut self.ema20,
            &mut self.ema50,
            &mut self.macd,
            &mut self.macd_signal,
            &mut self.macd_hist,
            &mut self.rsi7,
            &mut self.rsi14,
            &mut self.adx7,
            &mut self.adx14,
        ] {
            let start = values.len().saturating_sub(k);
            values.drain(..start);
        }
        self
    }
}

/// Indicator state of a single timeframe at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeContext {
    pub timeframe: Timeframe,
    pub ema5: f64,
    pub ema20: f64,
    pub ema50: f64,
    pub macd: f64,
    pub rsi7: f64,
    pub rsi14: f64,
    pub atr3: f64,
    pub atr14: f64,
    /// Volume of the most recent candle.
    pub current_volume: f64,
    /// Arithmetic mean volume over the whole supplied window.
    pub average_volume: f64,
    /// Most recent points of each indicator vector.
    pub series: IndicatorSeries,
}

/// Open interest of a perpetual contract, in contracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenInterest {
    pub latest: f64,
    /// Mean over the configured history window.
    pub average: f64,
}

/// Derivatives data merged into a snapshot.
///
/// The default value is what a snapshot carries when the market-context
/// collaborator fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub open_interest: OpenInterest,
    pub funding_rate: f64,
}

/// Multi-timeframe indicator snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    /// Close of the most recent short-timeframe candle.
    pub current_price: f64,
    /// Percent change against the close 20 short bars back.
    pub price_change_1h: f64,
    /// Percent change against the previous long-timeframe close.
    pub price_change_4h: f64,
    pub intraday: TimeframeContext,
    pub medium_term: TimeframeContext,
    pub long_term: TimeframeContext,
    pub open_interest: OpenInterest,
    pub funding_rate: f64,
}

impl MarketSnapshot {
    pub fn current_ema20(&self) -> f64 {
        self.intraday.ema20
    }

    pub fn current_macd(&self) -> f64 {
        self.intraday.macd
    }

    pub fn current_rsi7(&self) -> f64 {
        self.intraday.rsi7
    }
}
