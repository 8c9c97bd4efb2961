//! Pure technical indicators over closing prices or candles.
//!
//! Every indicator comes in a scalar form returning the value at the last
//! bar, and most in a vector form aligned index-for-index with the input.
//! Short inputs never fail:
//!   scalar form → `0.0`
//!   vector form → empty `Vec`
//!
//! RSI, ATR and ADX use Wilder smoothing, `avg = (avg·(n−1) + x) / n`.

pub mod adx;
pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use adx::adx_series;
pub use atr::{atr, atr_series, true_ranges};
pub use ema::{ema, ema_series};
pub use macd::{MacdSeries, macd, macd_series};
pub use rsi::{rsi, rsi_series};

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
