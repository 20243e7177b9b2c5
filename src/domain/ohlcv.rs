//! OHLCV bar representation.

use chrono::NaiveDateTime;

/// One time bar for one symbol. Within a series, timestamps are unique and
/// strictly increasing; high >= max(open, close), low <= min(open, close),
/// volume >= 0.
#[derive(Debug, Clone)]
pub struct OhlcvBar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// close * volume, the contribution of this bar to cumulative VWAP.
    pub fn traded_value(&self) -> f64 {
        self.close * self.volume as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_bar() -> OhlcvBar {
        OhlcvBar {
            symbol: "AAA".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        }
    }

    #[test]
    fn traded_value() {
        let bar = sample_bar();
        assert!((bar.traded_value() - 105.0 * 50_000.0).abs() < f64::EPSILON);
    }
}
