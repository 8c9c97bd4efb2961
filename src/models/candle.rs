//! OHLCV candlestick model.

use serde::{Deserialize, Serialize};

/// A single OHLCV bar, ordered oldest to latest within a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time in milliseconds since the Unix epoch.
    pub open_time: i64,
    /// Close time in milliseconds since the Unix epoch.
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Base-asset volume traded during the bar.
    pub volume: f64,
}

impl Candle {
    /// Builds a candle without timestamps, mostly useful for synthetic series.
    pub fn from_ohlcv(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time: 0,
            close_time: 0,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Extracts the closing prices of a series.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
