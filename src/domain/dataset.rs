//! Symbol datasets and the portfolio view.

use crate::domain::indicator::{self, IndicatorKind, IndicatorSeries};
use crate::domain::ohlcv::OhlcvBar;
use std::collections::HashMap;

/// One symbol's cleaned bars plus whatever indicator series have been
/// computed for it. Exclusively owned by its processing step until handed
/// to the aggregator, which only reads.
#[derive(Debug, Clone)]
pub struct SymbolDataset {
    pub symbol: String,
    pub bars: Vec<OhlcvBar>,
    pub indicators: HashMap<IndicatorKind, IndicatorSeries>,
}

impl SymbolDataset {
    pub fn new(symbol: String, bars: Vec<OhlcvBar>) -> Self {
        Self {
            symbol,
            bars,
            indicators: HashMap::new(),
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Consume the dataset and return it augmented with the requested
    /// series. Each series is aligned 1:1 with the bars.
    pub fn with_indicators(mut self, kinds: &[IndicatorKind]) -> Self {
        for &kind in kinds {
            self.indicators.insert(kind, indicator::compute(&self.bars, kind));
        }
        self
    }

    pub fn indicator(&self, kind: &IndicatorKind) -> Option<&IndicatorSeries> {
        self.indicators.get(kind)
    }
}

/// Up to ten symbol datasets keyed by symbol, insertion order preserved.
#[derive(Debug, Clone, Default)]
pub struct PortfolioView {
    datasets: Vec<SymbolDataset>,
}

impl PortfolioView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset, replacing any existing entry for the same symbol
    /// in place (the original position in the ordering is kept).
    pub fn insert(&mut self, dataset: SymbolDataset) {
        match self.datasets.iter_mut().find(|d| d.symbol == dataset.symbol) {
            Some(existing) => *existing = dataset,
            None => self.datasets.push(dataset),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolDataset> {
        self.datasets.iter().find(|d| d.symbol == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolDataset> {
        self.datasets.iter()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorValue;
    use chrono::NaiveDate;

    fn make_bars(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                symbol: symbol.into(),
                timestamp: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn with_indicators_aligns_series() {
        let dataset = SymbolDataset::new("AAA".into(), make_bars("AAA", &[1.0, 2.0, 3.0]))
            .with_indicators(&[IndicatorKind::Sma(2), IndicatorKind::Vwap]);

        assert_eq!(dataset.indicators.len(), 2);
        for series in dataset.indicators.values() {
            assert_eq!(series.values.len(), dataset.bar_count());
        }
    }

    #[test]
    fn with_indicators_leaves_bars_untouched() {
        let bars = make_bars("AAA", &[1.0, 2.0, 3.0]);
        let dataset =
            SymbolDataset::new("AAA".into(), bars.clone()).with_indicators(&[IndicatorKind::Vwap]);

        assert_eq!(dataset.bar_count(), bars.len());
        for (a, b) in dataset.bars.iter().zip(&bars) {
            assert!((a.close - b.close).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn with_indicators_recompute_replaces_series() {
        let dataset = SymbolDataset::new("AAA".into(), make_bars("AAA", &[1.0, 2.0]))
            .with_indicators(&[IndicatorKind::Sma(2)])
            .with_indicators(&[IndicatorKind::Sma(2)]);

        assert_eq!(dataset.indicators.len(), 1);
        let series = dataset.indicator(&IndicatorKind::Sma(2)).unwrap();
        assert!(matches!(
            series.values[1].value,
            IndicatorValue::Simple(v) if (v - 1.5).abs() < 1e-10
        ));
    }

    #[test]
    fn view_preserves_insertion_order() {
        let mut view = PortfolioView::new();
        view.insert(SymbolDataset::new("BBB".into(), make_bars("BBB", &[1.0])));
        view.insert(SymbolDataset::new("AAA".into(), make_bars("AAA", &[1.0])));

        assert_eq!(view.symbols(), vec!["BBB", "AAA"]);
    }

    #[test]
    fn view_replaces_duplicate_symbol_in_place() {
        let mut view = PortfolioView::new();
        view.insert(SymbolDataset::new("AAA".into(), make_bars("AAA", &[1.0])));
        view.insert(SymbolDataset::new("BBB".into(), make_bars("BBB", &[1.0])));
        view.insert(SymbolDataset::new(
            "AAA".into(),
            make_bars("AAA", &[1.0, 2.0]),
        ));

        assert_eq!(view.len(), 2);
        assert_eq!(view.symbols(), vec!["AAA", "BBB"]);
        assert_eq!(view.get("AAA").unwrap().bar_count(), 2);
    }

    #[test]
    fn view_get_missing_symbol() {
        let view = PortfolioView::new();
        assert!(view.get("ZZZ").is_none());
        assert!(view.is_empty());
    }
}
