use crate::models::Candle;

/// True range of `bar` given the previous close:
/// `max(high − low, |high − prev_close|, |low − prev_close|)`.
pub fn true_range(prev_close: f64, bar: &Candle) -> f64 {
    (bar.high - bar.low)
        .max((bar.high - prev_close).abs())
        .max((bar.low - prev_close).abs())
}

/// True ranges of bars `1..len`; the first bar has no previous close and
/// is skipped, so the result holds `len − 1` values.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|w| true_range(w[0].close, &w[1]))
        .collect()
}

/// Average True Range at the last bar, Wilder smoothing seeded with the
/// mean of the first `period` true ranges.
///
/// Returns `0.0` unless more than `period` candles are available.
pub fn atr(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() <= period {
        return 0.0;
    }
    let trs = true_ranges(candles);
    let n = period as f64;
    trs[period..]
        .iter()
        .fold(seed(&trs, period), |atr, &tr| (atr * (n - 1.0) + tr) / n)
}

/// Aligned ATR, first defined at index `period`; empty unless more than
/// `period` candles are available.
pub fn atr_series(candles: &[Candle], period: usize) -> Vec<f64> {
    if period == 0 || candles.len() <= period {
        return Vec::new();
    }
    let trs = true_ranges(candles);
    let n = period as f64;
    let mut out = vec![0.0; candles.len()];
    let mut value = seed(&trs, period);
    out[period] = value;
    // trs[j] belongs to bar j + 1
    for (j, &tr) in trs.iter().enumerate().skip(period) {
        value = (value * (n - 1.0) + tr) / n;
        out[j + 1] = value;
    }
    out
}

fn seed(trs: &[f64], period: usize) -> f64 {
    trs[..period].iter().sum::<f64>() / period as f64
}
