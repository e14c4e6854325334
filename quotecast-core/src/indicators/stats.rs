//! Return-based statistics: daily returns, volatility, Pearson correlation.

/// Day-over-day fractional returns.
///
/// Output has `prices.len() - 1` elements (empty for fewer than two prices).
/// A zero previous price yields a 0 return for that day instead of infinity.
pub fn returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect()
}

/// Population standard deviation of the returns of the trailing `window` prices.
///
/// Fewer than two prices in the window → 0.
pub fn volatility(prices: &[f64], window: usize) -> f64 {
    let tail = &prices[prices.len().saturating_sub(window)..];
    let rets = returns(tail);
    if rets.is_empty() {
        return 0.0;
    }
    let n = rets.len() as f64;
    let mean = rets.iter().sum::<f64>() / n;
    let var = rets.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}

/// Pearson correlation over the first `min(x.len(), y.len())` elements.
///
/// Returns 0 when fewer than two pairs are available or when either side
/// has zero variance.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    cov / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn returns_basic() {
        let r = returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert_approx(r[0], 0.10, DEFAULT_EPSILON);
        assert_approx(r[1], -0.10, DEFAULT_EPSILON);
    }

    #[test]
    fn returns_short_input() {
        assert!(returns(&[]).is_empty());
        assert!(returns(&[5.0]).is_empty());
    }

    #[test]
    fn returns_zero_previous_price() {
        let r = returns(&[0.0, 10.0, 20.0]);
        assert_eq!(r[0], 0.0);
        assert_approx(r[1], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn volatility_constant_growth_is_zero() {
        // Every return is exactly +10%
        let prices = [100.0, 110.0, 121.0, 133.1];
        assert_approx(volatility(&prices, 20), 0.0, 1e-12);
    }

    #[test]
    fn volatility_alternating() {
        // Returns: +0.1, -0.1/1.1 ... compute by hand on two returns
        let prices = [100.0, 110.0, 99.0];
        // returns = [0.1, -0.1], mean 0, population std = 0.1
        assert_approx(volatility(&prices, 3), 0.1, 1e-12);
    }

    #[test]
    fn volatility_uses_trailing_window() {
        // Wild moves early, flat at the end: trailing window sees only flat prices
        let mut prices = vec![100.0, 200.0, 50.0, 300.0];
        prices.extend(std::iter::repeat(80.0).take(25));
        assert_approx(volatility(&prices, 20), 0.0, DEFAULT_EPSILON);
        assert!(volatility(&prices, 29) > 0.0);
    }

    #[test]
    fn volatility_too_few_prices() {
        assert_eq!(volatility(&[100.0], 20), 0.0);
        assert_eq!(volatility(&[], 20), 0.0);
    }

    #[test]
    fn correlation_with_self_is_one() {
        let x = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_approx(correlation(&x, &x), 1.0, 1e-12);
    }

    #[test]
    fn correlation_with_negated_shifted_copy_is_minus_one() {
        let x = [1.0, 3.0, 2.0, 5.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 10.0 - v).collect();
        assert_approx(correlation(&x, &y), -1.0, 1e-12);
    }

    #[test]
    fn correlation_uses_shorter_length() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.0, 6.0, -100.0, 50.0];
        assert_approx(correlation(&x, &y), 1.0, 1e-12);
    }

    #[test]
    fn correlation_degenerate_inputs_are_zero() {
        assert_eq!(correlation(&[1.0], &[2.0]), 0.0);
        assert_eq!(correlation(&[], &[]), 0.0);
        assert_eq!(correlation(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(correlation(&[4.0, 4.0], &[7.0, 7.0]), 0.0);
    }
}
