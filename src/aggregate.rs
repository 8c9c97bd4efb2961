//! Per-timeframe aggregation: one candle series in, one
//! [`TimeframeContext`] out.

use tracing::debug;

use crate::indicators::{self, adx_series, atr, ema, ema_series, macd, macd_series, rsi, rsi_series};
use crate::models::candle::closes;
use crate::models::{Candle, IndicatorSeries, Timeframe, TimeframeContext};

/// Number of most-recent points kept for each indicator vector.
pub const SERIES_TAIL_LEN: usize = 10;

/// Which indicator vectors are computed for a timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesProfile {
    /// Closes, EMA-5/20/50, MACD, RSI-7/14 and ADX-7/14.
    Intraday,
    /// MACD and RSI-14 only.
    Trend,
}

/// Computes the indicator context of one timeframe.
///
/// Never fails: an indicator whose warm-up exceeds the series length has a
/// scalar of `0.0` and an empty vector.
pub fn aggregate(timeframe: Timeframe, candles: &[Candle], profile: SeriesProfile) -> TimeframeContext {
    let closes = closes(candles);
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    let macd_out = macd_series(&closes);
    let mut series = IndicatorSeries {
        macd: macd_out.macd,
        macd_signal: macd_out.signal,
        macd_hist: macd_out.histogram,
        rsi14: rsi_series(&closes, 14),
        ..IndicatorSeries::default()
    };

    if profile == SeriesProfile::Intraday {
        series.ema5 = ema_series(&closes, 5);
        series.ema20 = ema_series(&closes, 20);
        series.ema50 = ema_series(&closes, 50);
        series.rsi7 = rsi_series(&closes, 7);
        series.adx7 = adx_series(candles, 7);
        series.adx14 = adx_series(candles, 14);
        series.close = closes.clone();
    }

    debug!(
        timeframe = timeframe.as_str(),
        candles = candles.len(),
        ?profile,
        "Aggregated timeframe"
    );

    TimeframeContext {
        timeframe,
        ema5: ema(&closes, 5),
        ema20: ema(&closes, 20),
        ema50: ema(&closes, 50),
        macd: macd(&closes),
        rsi7: rsi(&closes, 7),
        rsi14: rsi(&closes, 14),
        atr3: atr(candles, 3),
        atr14: atr(candles, 14),
        current_volume: volumes.last().copied().unwrap_or(0.0),
        average_volume: indicators::mean(&volumes),
        series: series.tail(SERIES_TAIL_LEN),
    }
}
