//! Momentum: mean daily return over a trailing window.
//!
//! momentum = mean(returns(trailing `period` prices))
//! Fewer than `period` prices → 0.

use super::stats::returns;

pub fn momentum(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period {
        return 0.0;
    }
    let rets = returns(&prices[prices.len() - period..]);
    if rets.is_empty() {
        return 0.0;
    }
    rets.iter().sum::<f64>() / rets.len() as f64
}
