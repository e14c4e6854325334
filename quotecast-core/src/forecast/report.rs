//! Dated forecast report for display and JSON output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::next_trading_days;
use super::noise::NoiseSource;
use super::projector::{ForecastPoint, Projector};
use crate::domain::MarketPair;
use crate::indicators::IndicatorSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub point: ForecastPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub symbol: String,
    pub reference_symbol: String,
    pub history_len: usize,
    pub last_close: Option<f64>,
    pub last_date: Option<NaiveDate>,
    /// `None` when history was too short to forecast.
    pub snapshot: Option<IndicatorSnapshot>,
    pub daily_bound: Option<f64>,
    pub points: Vec<DatedPoint>,
}

impl ForecastReport {
    pub fn insufficient_history(&self) -> bool {
        self.snapshot.is_none()
    }
}

/// Project a market pair and attach calendar dates to each step.
///
/// Short history is not an error: the report comes back with no snapshot
/// and no points.
pub fn build_report<N: NoiseSource + ?Sized>(
    pair: &MarketPair,
    projector: &Projector,
    horizon: usize,
    noise: &mut N,
) -> ForecastReport {
    let target = &pair.target;
    let reference = &pair.reference;

    let snapshot = projector.snapshot(&target.closes, &reference.closes);
    let (points, daily_bound) = match (&snapshot, target.last_close(), target.last_date()) {
        (Some(snap), Some(last_close), Some(last_date)) => {
            let raw = projector.project_from(snap, last_close, horizon, noise);
            let dates = next_trading_days(last_date, raw.len());
            let dated = dates
                .into_iter()
                .zip(raw)
                .map(|(date, point)| DatedPoint { date, point })
                .collect();
            (dated, Some(snap.daily_bound(projector.config())))
        }
        _ => {
            log::info!(
                "{}: {} closes, need {} to forecast",
                target.symbol,
                target.len(),
                projector.config().min_history
            );
            (Vec::new(), None)
        }
    };

    ForecastReport {
        symbol: target.symbol.clone(),
        reference_symbol: reference.symbol.clone(),
        history_len: target.len(),
        last_close: target.last_close(),
        last_date: target.last_date(),
        snapshot,
        daily_bound,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceSeries;
    use crate::forecast::noise::ConstantNoise;

    fn series(symbol: &str, n: usize, base: f64) -> PriceSeries {
        // 2024-01-01 is a Monday; weekday-only dates
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = next_trading_days(start - chrono::Duration::days(1), n);
        let closes = (0..n).map(|i| base + (i as f64 * 0.5).cos() * 2.0).collect();
        PriceSeries::new(symbol, dates, closes)
    }

    #[test]
    fn report_has_dated_points() {
        let pair = MarketPair {
            target: series("AAPL", 60, 150.0),
            reference: series("SPY", 60, 450.0),
        };
        let report = build_report(&pair, &Projector::default(), 5, &mut ConstantNoise(0.5));

        assert!(!report.insufficient_history());
        assert_eq!(report.points.len(), 5);
        assert_eq!(report.reference_symbol, "SPY");
        let last = report.last_date.unwrap();
        assert!(report.points.iter().all(|p| p.date > last));
        assert!(report.points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn report_short_history() {
        let pair = MarketPair {
            target: series("NEW", 20, 10.0),
            reference: series("SPY", 60, 450.0),
        };
        let report = build_report(&pair, &Projector::default(), 5, &mut ConstantNoise(0.5));
        assert!(report.insufficient_history());
        assert!(report.points.is_empty());
        assert_eq!(report.history_len, 20);
        assert!(report.daily_bound.is_none());
    }

    #[test]
    fn report_serializes_flat_points() {
        let pair = MarketPair {
            target: series("AAPL", 55, 150.0),
            reference: series("SPY", 55, 450.0),
        };
        let report = build_report(&pair, &Projector::default(), 2, &mut ConstantNoise(0.5));
        let json = serde_json::to_value(&report).unwrap();
        let first = &json["points"][0];
        assert!(first.get("date").is_some());
        assert!(first.get("price").is_some());
        assert_eq!(first["day"], 1);
    }
}
