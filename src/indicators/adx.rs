use super::atr::true_range;
use crate::models::Candle;

/// Average Directional Index, standard Wilder definition.
///
/// 1. +DM, −DM and TR for every bar after the first
/// 2. Sum each over bars `1..=period`, then `s = s − s/period + x`
/// 3. +DI = s(+DM)/s(TR)·100, −DI = s(−DM)/s(TR)·100
/// 4. DX = |+DI − −DI| / (+DI + −DI)·100
/// 5. ADX = mean of the first `period` DX values, then Wilder-smoothed
///
/// The result is aligned with `candles`: first defined at index
/// `2·period − 1`, zeros before, empty with fewer than `2·period` candles.
/// Zero denominators yield `0.0`.
pub fn adx_series(candles: &[Candle], period: usize) -> Vec<f64> {
    let len = candles.len();
    if period == 0 || len < 2 * period {
        return Vec::new();
    }

    let n = period as f64;
    let mut out = vec![0.0; len];

    let mut smoothed = Smoothed::default();
    for w in candles[..=period].windows(2) {
        let dm = DirectionalMove::between(&w[0], &w[1]);
        smoothed.plus_dm += dm.plus;
        smoothed.minus_dm += dm.minus;
        smoothed.tr += dm.tr;
    }

    let mut adx = 0.0;
    let mut dx_sum = 0.0;
    let mut dx_count = 0;
    for i in period..len {
        if i > period {
            let dm = DirectionalMove::between(&candles[i - 1], &candles[i]);
            smoothed.plus_dm = smoothed.plus_dm - smoothed.plus_dm / n + dm.plus;
            smoothed.minus_dm = smoothed.minus_dm - smoothed.minus_dm / n + dm.minus;
            smoothed.tr = smoothed.tr - smoothed.tr / n + dm.tr;
        }
        let dx = smoothed.dx();

        if dx_count < period {
            dx_sum += dx;
            dx_count += 1;
            if dx_count == period {
                adx = dx_sum / n;
                out[i] = adx;
            }
        } else {
            adx = (adx * (n - 1.0) + dx) / n;
            out[i] = adx;
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct DirectionalMove {
    plus: f64,
    minus: f64,
    tr: f64,
}

impl DirectionalMove {
    fn between(prev: &Candle, bar: &Candle) -> Self {
        let up_move = bar.high - prev.high;
        let down_move = prev.low - bar.low;
        Self {
            plus: if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            },
            minus: if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            },
            tr: true_range(prev.close, bar),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Smoothed {
    plus_dm: f64,
    minus_dm: f64,
    tr: f64,
}

impl Smoothed {
    fn dx(&self) -> f64 {
        if self.tr <= 0.0 {
            return 0.0;
        }
        let di_pos = self.plus_dm / self.tr * 100.0;
        let di_neg = self.minus_dm / self.tr * 100.0;
        let di_sum = di_pos + di_neg;
        if di_sum > 0.0 {
            (di_pos - di_neg).abs() / di_sum * 100.0
        } else {
            0.0
        }
    }
}
