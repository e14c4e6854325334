//! Map forecast offsets to calendar dates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The next `n` weekdays strictly after `last`. No holiday calendar.
pub fn next_trading_days(last: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(n);
    let mut day = last;
    while dates.len() < n {
        day += Duration::days(1);
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(day);
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn skips_weekend_after_friday() {
        // 2024-01-05 is a Friday
        let dates = next_trading_days(d(2024, 1, 5), 3);
        assert_eq!(dates, vec![d(2024, 1, 8), d(2024, 1, 9), d(2024, 1, 10)]);
    }

    #[test]
    fn midweek_start() {
        // Wednesday → Thu, Fri, Mon
        let dates = next_trading_days(d(2024, 1, 3), 3);
        assert_eq!(dates, vec![d(2024, 1, 4), d(2024, 1, 5), d(2024, 1, 8)]);
    }

    #[test]
    fn saturday_start() {
        let dates = next_trading_days(d(2024, 1, 6), 1);
        assert_eq!(dates, vec![d(2024, 1, 8)]);
    }

    #[test]
    fn zero_days() {
        assert!(next_trading_days(d(2024, 1, 3), 0).is_empty());
    }
}
