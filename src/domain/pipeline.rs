//! Per-symbol assembly: fetch, validate, compute indicators, collect.
//!
//! Symbols are processed one at a time to completion. A failure for one
//! symbol is reported and skipped; the rest of the batch proceeds, so the
//! resulting view may hold fewer datasets than were requested.

use crate::domain::dataset::{PortfolioView, SymbolDataset};
use crate::domain::selection::ChartRequest;
use crate::domain::validate::clean_series;
use crate::ports::data_port::MarketDataPort;

pub struct AssemblyResult {
    pub view: PortfolioView,
    pub skipped: Vec<SkippedSymbol>,
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

pub fn assemble(port: &dyn MarketDataPort, request: &ChartRequest) -> AssemblyResult {
    let mut view = PortfolioView::new();
    let mut skipped = Vec::new();

    for symbol in &request.symbols {
        let raw = match port.fetch_ohlcv(symbol, request.period, request.interval) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", symbol, e);
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let bars = match clean_series(&raw) {
            Ok(bars) => bars,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", symbol, e);
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        eprintln!("  {}: {} bars [OK]", symbol, bars.len());
        view.insert(SymbolDataset::new(symbol.clone(), bars).with_indicators(&request.indicators));
    }

    AssemblyResult { view, skipped }
}
