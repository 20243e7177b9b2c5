//! Multi-series chart aggregation.
//!
//! [`compose`] merges up to ten symbol datasets into one renderable
//! [`ChartLayerSet`] without mutating any of them: one price layer per
//! symbol in insertion order, plus one panel per selected oscillator
//! holding only the symbols that carry that series.

use crate::domain::dataset::PortfolioView;
use crate::domain::indicator::{IndicatorKind, IndicatorSeries};
use crate::domain::ohlcv::OhlcvBar;

/// A display color, as a CSS hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub &'static str);

/// Fixed palette cycled across symbols. Assignment depends only on the
/// symbol's position, so repeated runs color identically.
pub const PALETTE: [Color; 6] = [
    Color("#1f77b4"),
    Color("#ff7f0e"),
    Color("#2ca02c"),
    Color("#d62728"),
    Color("#9467bd"),
    Color("#8c564b"),
];

pub fn assign_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Highest high and lowest low of a series, for reference lines.
/// NaN entries are skipped; a series with no finite highs/lows has no
/// extremes.
pub fn rolling_extreme(bars: &[OhlcvBar]) -> Option<(f64, f64)> {
    let mut max_high = f64::NEG_INFINITY;
    let mut min_low = f64::INFINITY;

    for bar in bars {
        if bar.high.is_finite() && bar.high > max_high {
            max_high = bar.high;
        }
        if bar.low.is_finite() && bar.low < min_low {
            min_low = bar.low;
        }
    }

    (max_high.is_finite() && min_low.is_finite()).then_some((max_high, min_low))
}

/// The derived, read-only structure a rendering surface consumes.
#[derive(Debug, Clone)]
pub struct ChartLayerSet {
    pub price_layers: Vec<PriceLayer>,
    pub oscillator_panels: Vec<OscillatorPanel>,
}

#[derive(Debug, Clone)]
pub struct PriceLayer {
    pub symbol: String,
    pub color: Color,
    pub candles: Vec<OhlcvBar>,
    pub show_volume: bool,
    pub extremes: Option<(f64, f64)>,
    pub overlays: Vec<IndicatorSeries>,
}

#[derive(Debug, Clone)]
pub struct OscillatorPanel {
    pub kind: IndicatorKind,
    pub traces: Vec<OscillatorTrace>,
}

#[derive(Debug, Clone)]
pub struct OscillatorTrace {
    pub symbol: String,
    pub color: Color,
    pub series: IndicatorSeries,
}

/// Build the chart layer set for a portfolio view. Pure: reads the view,
/// never writes it. Panels for oscillators no dataset carries are dropped.
pub fn compose(
    view: &PortfolioView,
    indicators: &[IndicatorKind],
    show_volume: bool,
) -> ChartLayerSet {
    let price_layers = view
        .iter()
        .enumerate()
        .map(|(i, dataset)| PriceLayer {
            symbol: dataset.symbol.clone(),
            color: assign_color(i),
            candles: dataset.bars.clone(),
            show_volume,
            extremes: rolling_extreme(&dataset.bars),
            overlays: indicators
                .iter()
                .filter(|k| !k.is_oscillator())
                .filter_map(|k| dataset.indicator(k).cloned())
                .collect(),
        })
        .collect();

    let oscillator_panels = indicators
        .iter()
        .filter(|k| k.is_oscillator())
        .map(|kind| OscillatorPanel {
            kind: *kind,
            traces: view
                .iter()
                .enumerate()
                .filter_map(|(i, dataset)| {
                    dataset.indicator(kind).map(|series| OscillatorTrace {
                        symbol: dataset.symbol.clone(),
                        color: assign_color(i),
                        series: series.clone(),
                    })
                })
                .collect(),
        })
        .filter(|panel| !panel.traces.is_empty())
        .collect();

    ChartLayerSet {
        price_layers,
        oscillator_panels,
    }
}
