//! Rolling indicator math over close/high/low series.
//!
//! Every function returns `None` until the underlying window is fully
//! formed, so callers never compare against a half-built value.

/// Simple moving average of the `period` values ending at `index`.
pub fn sma_at(values: &[f64], period: usize, index: usize) -> Option<f64> {
    if period == 0 || index >= values.len() || index + 1 < period {
        return None;
    }
    let window = &values[index + 1 - period..=index];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Rate of change between `values[index - period]` and `values[index]`,
/// expressed as a ratio (0.05 = +5%). `None` when the base value is 0.
pub fn roc_at(values: &[f64], period: usize, index: usize) -> Option<f64> {
    if period == 0 || index >= values.len() || index < period {
        return None;
    }
    let base = values[index - period];
    if base == 0.0 {
        return None;
    }
    Some(values[index] / base - 1.0)
}

/// Wilder-smoothed RSI of the series prefix ending at `index`, bounded
/// 0..=100. Needs `period` deltas, so the first reading is at `index == period`.
pub fn rsi_at(values: &[f64], period: usize, index: usize) -> Option<f64> {
    if period == 0 || index >= values.len() || index < period {
        return None;
    }

    let mut sum_gain = 0.0f64;
    let mut sum_loss = 0.0f64;
    for i in 1..=period {
        let delta = values[i] - values[i - 1];
        if delta >= 0.0 {
            sum_gain += delta;
        } else {
            sum_loss += -delta;
        }
    }

    let mut avg_gain = sum_gain / period as f64;
    let mut avg_loss = sum_loss / period as f64;

    for i in (period + 1)..=index {
        let delta = values[i] - values[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
    }

    Some(rsi_from_avgs(avg_gain, avg_loss))
}

fn rsi_from_avgs(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Maximum of the `period` values ending at `end_index` inclusive.
pub fn window_max_at(values: &[f64], period: usize, end_index: usize) -> Option<f64> {
    window_at(values, period, end_index)
        .map(|window| window.iter().copied().fold(f64::MIN, f64::max))
}

/// Minimum of the `period` values ending at `end_index` inclusive.
pub fn window_min_at(values: &[f64], period: usize, end_index: usize) -> Option<f64> {
    window_at(values, period, end_index)
        .map(|window| window.iter().copied().fold(f64::MAX, f64::min))
}

fn window_at(values: &[f64], period: usize, end_index: usize) -> Option<&[f64]> {
    if period == 0 || end_index >= values.len() || end_index + 1 < period {
        return None;
    }
    Some(&values[end_index + 1 - period..=end_index])
}
