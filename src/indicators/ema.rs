/// Exponential Moving Average seeded with the simple average of the first
/// `period` prices, then `ema = (price − ema)·k + ema` with `k = 2/(period+1)`.
///
/// Returns `0.0` when fewer than `period` prices are available.
pub fn ema(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period {
        return 0.0;
    }
    let k = multiplier(period);
    closes[period..]
        .iter()
        .fold(seed(closes, period), |value, &price| (price - value) * k + value)
}

/// Aligned EMA: index `period − 1` holds the seed, earlier indices are `0.0`.
///
/// Empty when fewer than `period` prices are available. The last element is
/// bit-identical to [`ema`] over the same input.
pub fn ema_series(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }
    let k = multiplier(period);
    let mut out = vec![0.0; closes.len()];
    let mut value = seed(closes, period);
    out[period - 1] = value;
    for (i, &price) in closes.iter().enumerate().skip(period) {
        value = (price - value) * k + value;
        out[i] = value;
    }
    out
}

fn multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

fn seed(closes: &[f64], period: usize) -> f64 {
    closes[..period].iter().sum::<f64>() / period as f64
}
