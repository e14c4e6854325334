//! Relative Strength Index (RSI) over the trailing window.
//!
//! Simple averages (not Wilder smoothing) of the last `period` day-over-day
//! changes: RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Edge cases: avg_loss == 0 → 70 (capped below the textbook 100 so a
//! quiet uptrend does not saturate the signal); fewer than 2 prices → 50.

/// Value returned when the trailing window contains no losses.
pub const RSI_NO_LOSS: f64 = 70.0;

/// Value returned when there is not enough history to form a single change.
pub const RSI_NEUTRAL: f64 = 50.0;

/// RSI of the trailing `period + 1` prices.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    let tail = &prices[prices.len().saturating_sub(period + 1)..];
    if tail.len() < 2 || period == 0 {
        return RSI_NEUTRAL;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for w in tail.windows(2) {
        let change = w[1] - w[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    if avg_loss == 0.0 {
        return RSI_NO_LOSS;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
