//! CSV file market data adapter.
//!
//! Reads `{SYMBOL}_{interval}.csv` under a base directory. Cells that are
//! absent or unparseable become `None` in the raw rows; the validator
//! decides what to do with them. The period bounds the window counted
//! back from the newest timestamp in the file.

use crate::domain::error::MarketdashError;
use crate::domain::timeframe::{Interval, Period};
use crate::domain::validate::{RawRow, RawSeries};
use crate::ports::data_port::MarketDataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

pub struct CsvMarketDataAdapter {
    base_path: PathBuf,
}

impl CsvMarketDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: Interval) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, interval))
    }
}

fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(cell, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_f64(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|s| s.trim().parse().ok())
}

fn parse_volume(cell: Option<&str>) -> Option<i64> {
    let cell = cell?.trim();
    cell.parse::<i64>()
        .ok()
        .or_else(|| cell.parse::<f64>().ok().map(|v| v as i64))
}

impl MarketDataPort for CsvMarketDataAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<RawSeries, MarketdashError> {
        let path = self.csv_path(symbol, interval);
        let content = fs::read_to_string(&path).map_err(|e| MarketdashError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| MarketdashError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("CSV header error: {}", e),
        })?;
        let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let index_of = |name: &str| {
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
        };
        let ts_idx = index_of("timestamp").or_else(|| index_of("date"));
        let open_idx = index_of("open");
        let high_idx = index_of("high");
        let low_idx = index_of("low");
        let close_idx = index_of("close");
        let volume_idx = index_of("volume");

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| MarketdashError::Fetch {
                symbol: symbol.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));
            rows.push(RawRow {
                timestamp: cell(ts_idx).and_then(parse_timestamp),
                open: parse_f64(cell(open_idx)),
                high: parse_f64(cell(high_idx)),
                low: parse_f64(cell(low_idx)),
                close: parse_f64(cell(close_idx)),
                volume: parse_volume(cell(volume_idx)),
            });
        }

        if let Some(lookback) = period.lookback() {
            let newest = rows.iter().filter_map(|r| r.timestamp).max();
            if let Some(newest) = newest {
                let cutoff = newest - lookback;
                rows.retain(|r| r.timestamp.is_none_or(|t| t >= cutoff));
            }
        }

        Ok(RawSeries {
            symbol: symbol.to_string(),
            columns,
            rows,
        })
    }

    fn list_symbols(&self, interval: Interval) -> Result<Vec<String>, MarketdashError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| MarketdashError::Fetch {
            symbol: String::new(),
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", interval);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| MarketdashError::Fetch {
                symbol: String::new(),
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(&suffix) {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "timestamp,open,high,low,close,volume\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n\
            2024-01-17,110.0,120.0,105.0,,55000\n";

        fs::write(path.join("AAA_1d.csv"), csv_content).unwrap();
        fs::write(
            path.join("BBB_1d.csv"),
            "timestamp,open,high,low,close,volume\n",
        )
        .unwrap();
        fs::write(
            path.join("AAA_1h.csv"),
            "timestamp,open,high,low,close,volume\n\
             2024-01-15 10:00:00,100.0,101.0,99.0,100.5,500\n",
        )
        .unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_ohlcv_reads_rows_and_columns() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path);

        let raw = adapter
            .fetch_ohlcv("AAA", Period::Max, Interval::Daily)
            .unwrap();

        assert_eq!(raw.symbol, "AAA");
        assert_eq!(
            raw.columns,
            vec!["timestamp", "open", "high", "low", "close", "volume"]
        );
        assert_eq!(raw.rows.len(), 3);
        assert_eq!(raw.rows[0].open, Some(100.0));
        assert_eq!(raw.rows[0].volume, Some(50000));
    }

    #[test]
    fn fetch_ohlcv_blank_cell_is_none() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path);

        let raw = adapter
            .fetch_ohlcv("AAA", Period::Max, Interval::Daily)
            .unwrap();

        assert_eq!(raw.rows[2].close, None);
        assert_eq!(raw.rows[2].high, Some(120.0));
    }

    #[test]
    fn fetch_ohlcv_parses_intraday_timestamps() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path);

        let raw = adapter
            .fetch_ohlcv("AAA", Period::Max, Interval::Hourly)
            .unwrap();

        let ts = raw.rows[0].timestamp.unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "10:00");
    }

    #[test]
    fn fetch_ohlcv_applies_period_cutoff() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let mut content = String::from("timestamp,open,high,low,close,volume\n");
        // ~4 months of rows, one every 10 days
        for (month, day) in [(1, 5), (1, 15), (2, 10), (3, 10), (4, 20)] {
            content.push_str(&format!("2024-{:02}-{:02},1,2,0.5,1,10\n", month, day));
        }
        fs::write(path.join("AAA_1d.csv"), content).unwrap();

        let adapter = CsvMarketDataAdapter::new(path);
        let raw = adapter
            .fetch_ohlcv("AAA", Period::OneMonth, Interval::Daily)
            .unwrap();

        // only rows within 30 days of 2024-04-20 survive
        assert_eq!(raw.rows.len(), 1);

        let raw = adapter
            .fetch_ohlcv("AAA", Period::Max, Interval::Daily)
            .unwrap();
        assert_eq!(raw.rows.len(), 5);
    }

    #[test]
    fn fetch_ohlcv_missing_file_is_fetch_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path);

        let result = adapter.fetch_ohlcv("ZZZ", Period::Max, Interval::Daily);
        assert!(matches!(
            result,
            Err(MarketdashError::Fetch { symbol, .. }) if symbol == "ZZZ"
        ));
    }

    #[test]
    fn list_symbols_filters_by_interval() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path);

        assert_eq!(
            adapter.list_symbols(Interval::Daily).unwrap(),
            vec!["AAA", "BBB"]
        );
        assert_eq!(adapter.list_symbols(Interval::Hourly).unwrap(), vec!["AAA"]);
    }
}
