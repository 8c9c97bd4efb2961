/// Wilder-smoothed average gain and loss.
#[derive(Debug, Clone, Copy)]
struct WilderRsi {
    period: f64,
    avg_gain: f64,
    avg_loss: f64,
}

impl WilderRsi {
    /// Seeds the averages from the first `period` price changes.
    fn seed(closes: &[f64], period: usize) -> Self {
        let (gains, losses) = closes[..=period]
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold((0.0, 0.0), |(g, l), change| {
                if change > 0.0 {
                    (g + change, l)
                } else {
                    (g, l - change)
                }
            });
        let period = period as f64;
        Self {
            period,
            avg_gain: gains / period,
            avg_loss: losses / period,
        }
    }

    fn update(&mut self, change: f64) {
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        self.avg_gain = (self.avg_gain * (self.period - 1.0) + gain) / self.period;
        self.avg_loss = (self.avg_loss * (self.period - 1.0) + loss) / self.period;
    }

    fn value(&self) -> f64 {
        if self.avg_loss == 0.0 {
            return 100.0;
        }
        let rs = self.avg_gain / self.avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

/// Relative Strength Index at the last bar, Wilder smoothing.
///
/// Returns `0.0` unless more than `period` closes are available, and
/// `100.0` when the smoothed loss is exactly zero.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() <= period {
        return 0.0;
    }
    let mut state = WilderRsi::seed(closes, period);
    for w in closes[period..].windows(2) {
        state.update(w[1] - w[0]);
    }
    state.value()
}

/// Aligned RSI, first defined at index `period`; empty unless more than
/// `period` closes are available.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }
    let mut out = vec![0.0; closes.len()];
    let mut state = WilderRsi::seed(closes, period);
    out[period] = state.value();
    for i in period + 1..closes.len() {
        state.update(closes[i] - closes[i - 1]);
        out[i] = state.value();
    }
    out
}
