//! Snapshot assembly across the short, medium and long timeframes.

use crate::aggregate::{SeriesProfile, aggregate};
use crate::models::{Candle, MarketContext, MarketSnapshot, TimeframeContext, TimeframeSet};

/// Short bars between the current close and the 1h reference close.
pub const ONE_HOUR_LOOKBACK: usize = 20;

/// Long bars between the current close and the 4h reference close.
pub const FOUR_HOUR_LOOKBACK: usize = 1;

/// Percentage change from `past` to `current`; `0.0` when `past` is zero or
/// the result is not finite.
pub fn pct_change(current: f64, past: f64) -> f64 {
    if past == 0.0 {
        return 0.0;
    }
    let change = (current - past) / past * 100.0;
    if change.is_finite() { change } else { 0.0 }
}

/// Percentage change of `current` against the close `bars_back` bars before
/// the last candle, `0.0` if the series is too short.
pub fn change_over(candles: &[Candle], current: f64, bars_back: usize) -> f64 {
    candles
        .len()
        .checked_sub(bars_back + 1)
        .map_or(0.0, |i| pct_change(current, candles[i].close))
}

/// Price fields derived from the raw short and long series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChanges {
    pub current_price: f64,
    pub change_1h: f64,
    pub change_4h: f64,
}

impl PriceChanges {
    /// Reads the current price from the short series and compares it with
    /// the close 20 short bars back and the previous long close.
    pub fn from_series(short: &[Candle], long: &[Candle]) -> Self {
        let current_price = short.last().map_or(0.0, |c| c.close);
        Self {
            current_price,
            change_1h: change_over(short, current_price, ONE_HOUR_LOOKBACK),
            change_4h: change_over(long, current_price, FOUR_HOUR_LOOKBACK),
        }
    }
}

/// Combines already-aggregated contexts into a snapshot.
pub fn assemble(
    symbol: String,
    prices: PriceChanges,
    intraday: TimeframeContext,
    medium_term: TimeframeContext,
    long_term: TimeframeContext,
    context: MarketContext,
) -> MarketSnapshot {
    MarketSnapshot {
        symbol,
        current_price: prices.current_price,
        price_change_1h: prices.change_1h,
        price_change_4h: prices.change_4h,
        intraday,
        medium_term,
        long_term,
        open_interest: context.open_interest,
        funding_rate: context.funding_rate,
    }
}

/// Builds a snapshot from three candle series, aggregating sequentially.
///
/// `symbol` is used as given; callers normalize it first.
pub fn build_snapshot(
    symbol: &str,
    timeframes: TimeframeSet,
    short: &[Candle],
    medium: &[Candle],
    long: &[Candle],
    context: MarketContext,
) -> MarketSnapshot {
    assemble(
        symbol.to_string(),
        PriceChanges::from_series(short, long),
        aggregate(timeframes.short, short, SeriesProfile::Intraday),
        aggregate(timeframes.medium, medium, SeriesProfile::Trend),
        aggregate(timeframes.long, long, SeriesProfile::Trend),
        context,
    )
}
