//! Simple Moving Average (SMA).
//!
//! Rolling mean of closes over a lookback window. Indices before
//! `period - 1` have no value (`None`) rather than NaN.

/// Full SMA series, same length as `prices`.
pub fn moving_average(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = prices.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }

    let mut sum: f64 = prices[..period].iter().sum();
    result[period - 1] = Some(sum / period as f64);

    // Roll the window forward
    for i in period..n {
        sum += prices[i] - prices[i - period];
        result[i] = Some(sum / period as f64);
    }

    result
}

/// SMA value at the last index, if enough history exists.
pub fn last_moving_average(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }
    let tail = &prices[prices.len() - period..];
    Some(tail.iter().sum::<f64>() / period as f64)
}
