#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use marketdash::domain::error::MarketdashError;
use marketdash::domain::indicator::IndicatorKind;
use marketdash::domain::selection::ChartRequest;
use marketdash::domain::timeframe::{Interval, Period};
use marketdash::domain::validate::{RawRow, RawSeries};
pub use marketdash::domain::ohlcv::OhlcvBar;
use marketdash::ports::data_port::MarketDataPort;
use std::collections::HashMap;

pub struct MockMarketDataPort {
    pub data: HashMap<String, RawSeries>,
    pub errors: HashMap<String, String>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, symbol: &str, series: RawSeries) -> Self {
        self.data.insert(symbol.to_string(), series);
        self
    }

    pub fn with_bars(self, symbol: &str, points: &[(f64, i64)]) -> Self {
        let series = raw_series(symbol, points);
        self.with_series(symbol, series)
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        _period: Period,
        _interval: Interval,
    ) -> Result<RawSeries, MarketdashError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(MarketdashError::Fetch {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| raw_series(symbol, &[])))
    }

    fn list_symbols(&self, _interval: Interval) -> Result<Vec<String>, MarketdashError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn timestamp(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::days(day as i64 - 1)
}

pub fn ohlcv_columns() -> Vec<String> {
    ["timestamp", "open", "high", "low", "close", "volume"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Build a raw series of (close, volume) points, one bar per day.
pub fn raw_series(symbol: &str, points: &[(f64, i64)]) -> RawSeries {
    let rows = points
        .iter()
        .enumerate()
        .map(|(i, &(close, volume))| RawRow {
            timestamp: Some(timestamp(i as u32 + 1)),
            open: Some(close),
            high: Some(close + 1.0),
            low: Some(close - 1.0),
            close: Some(close),
            volume: Some(volume),
        })
        .collect();
    RawSeries {
        symbol: symbol.to_string(),
        columns: ohlcv_columns(),
        rows,
    }
}

pub fn make_bars(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            symbol: symbol.to_string(),
            timestamp: timestamp(i as u32 + 1),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        })
        .collect()
}

pub fn make_request(symbols: &[&str], indicators: Vec<IndicatorKind>) -> ChartRequest {
    ChartRequest {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        period: Period::ThreeMonths,
        interval: Interval::Daily,
        indicators,
        show_volume: true,
    }
}
