//! Series validation: raw fetched table to cleaned OHLCV bars.
//!
//! Cleaning drops rows with any absent field; it never interpolates.
//! A short series is not an error here: indicators that need more bars
//! than survive simply keep their leading entries invalid.

use crate::domain::error::MarketdashError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDateTime;

/// The five numeric fields every raw table must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// One row as received from a data adapter. Absent or unparseable cells
/// surface as `None` and are removed during cleaning.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub timestamp: Option<NaiveDateTime>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

/// A raw fetched table: the header names as received plus the rows.
#[derive(Debug, Clone)]
pub struct RawSeries {
    pub symbol: String,
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Validate and clean a raw series into ordered bars.
///
/// Fails with `MissingColumn` when a required header is absent and with
/// `EmptySeries` when no rows survive cleaning. Rows are sorted by
/// timestamp; duplicate timestamps keep the first occurrence.
pub fn clean_series(raw: &RawSeries) -> Result<Vec<OhlcvBar>, MarketdashError> {
    for required in REQUIRED_COLUMNS {
        if !raw.columns.iter().any(|c| c.trim().eq_ignore_ascii_case(required)) {
            return Err(MarketdashError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    let mut bars: Vec<OhlcvBar> = raw
        .rows
        .iter()
        .filter_map(|row| {
            Some(OhlcvBar {
                symbol: raw.symbol.clone(),
                timestamp: row.timestamp?,
                open: row.open?,
                high: row.high?,
                low: row.low?,
                close: row.close?,
                volume: row.volume?,
            })
        })
        .collect();

    bars.sort_by_key(|b| b.timestamp);
    bars.dedup_by_key(|b| b.timestamp);

    if bars.is_empty() {
        return Err(MarketdashError::EmptySeries {
            symbol: raw.symbol.clone(),
        });
    }

    Ok(bars)
}
