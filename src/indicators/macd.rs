use super::ema::{ema, ema_series};

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

/// MACD line, signal line and histogram, aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    /// `EMA12 − EMA26`, defined from index 25.
    pub macd: Vec<f64>,
    /// 9-period EMA of the MACD line, defined from index 33.
    pub signal: Vec<f64>,
    /// `macd − signal` wherever the signal is defined.
    pub histogram: Vec<f64>,
}

/// MACD line at the last bar, `EMA(12) − EMA(26)` over the whole series.
///
/// Returns `0.0` with fewer than 26 closes.
pub fn macd(closes: &[f64]) -> f64 {
    if closes.len() < SLOW_PERIOD {
        return 0.0;
    }
    ema(closes, FAST_PERIOD) - ema(closes, SLOW_PERIOD)
}

/// Aligned MACD (12, 26, 9).
///
/// The MACD vector is empty below 26 closes; signal and histogram are empty
/// below 34 closes.
pub fn macd_series(closes: &[f64]) -> MacdSeries {
    if closes.len() < SLOW_PERIOD {
        return MacdSeries::default();
    }

    let fast = ema_series(closes, FAST_PERIOD);
    let slow = ema_series(closes, SLOW_PERIOD);
    let start = SLOW_PERIOD - 1;

    let mut line = vec![0.0; closes.len()];
    for i in start..closes.len() {
        line[i] = fast[i] - slow[i];
    }

    let defined_signal = ema_series(&line[start..], SIGNAL_PERIOD);
    if defined_signal.is_empty() {
        return MacdSeries {
            macd: line,
            ..MacdSeries::default()
        };
    }

    let mut signal = vec![0.0; start];
    signal.extend(defined_signal);

    let signal_start = start + SIGNAL_PERIOD - 1;
    let histogram = line
        .iter()
        .zip(&signal)
        .enumerate()
        .map(|(i, (m, s))| if i >= signal_start { m - s } else { 0.0 })
        .collect();

    MacdSeries {
        macd: line,
        signal,
        histogram,
    }
}
