//! Performance summary: simple period return per symbol.

use crate::domain::dataset::SymbolDataset;
use crate::domain::error::MarketdashError;

/// Scalar summary for one symbol, recomputed on every invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub symbol: String,
    pub percent_return: f64,
}

/// Percent return between the first and last finite close of the raw
/// close column. Indicator columns never participate.
pub fn summarize(dataset: &SymbolDataset) -> Result<PerformanceRecord, MarketdashError> {
    let closes: Vec<f64> = dataset
        .bars
        .iter()
        .map(|b| b.close)
        .filter(|c| c.is_finite())
        .collect();

    if closes.len() < 2 {
        return Err(MarketdashError::InsufficientData {
            symbol: dataset.symbol.clone(),
            closes: closes.len(),
        });
    }

    let first = closes[0];
    let last = closes[closes.len() - 1];

    Ok(PerformanceRecord {
        symbol: dataset.symbol.clone(),
        percent_return: (last - first) / first * 100.0,
    })
}
