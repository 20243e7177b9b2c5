//! Export flattening: portfolio view to one tagged table.
//!
//! Every symbol's rows are concatenated under a leading `symbol` tag
//! column, with one column per selected indicator output. Invalid
//! (warmup) entries become empty cells, not zeros.

use crate::domain::dataset::PortfolioView;
use crate::domain::indicator::{IndicatorKind, IndicatorValue};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A flattened, serialization-ready table. All cells are already strings;
/// writers only need to emit them.
#[derive(Debug, Clone)]
pub struct TaggedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Column names one indicator kind contributes to the table.
pub fn column_names(kind: &IndicatorKind) -> Vec<String> {
    match kind {
        IndicatorKind::Sma(window) => vec![format!("sma_{window}")],
        IndicatorKind::Ema(span) => vec![format!("ema_{span}")],
        IndicatorKind::Rsi(period) => vec![format!("rsi_{period}")],
        IndicatorKind::Macd { .. } => vec!["macd".into(), "macd_signal".into()],
        IndicatorKind::Bollinger { .. } => {
            vec!["bb_upper".into(), "bb_middle".into(), "bb_lower".into()]
        }
        IndicatorKind::Vwap => vec!["vwap".into()],
    }
}

/// Flatten a portfolio view into one tagged table, symbols in view order,
/// indicator columns in selection order.
pub fn flatten(view: &PortfolioView, kinds: &[IndicatorKind]) -> TaggedTable {
    let mut header = vec![
        "symbol".to_string(),
        "timestamp".to_string(),
        "open".to_string(),
        "high".to_string(),
        "low".to_string(),
        "close".to_string(),
        "volume".to_string(),
    ];
    for kind in kinds {
        header.extend(column_names(kind));
    }

    let mut rows = Vec::new();
    for dataset in view.iter() {
        for (i, bar) in dataset.bars.iter().enumerate() {
            let mut row = vec![
                dataset.symbol.clone(),
                bar.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
            ];

            for kind in kinds {
                let point = dataset
                    .indicator(kind)
                    .and_then(|series| series.values.get(i))
                    .filter(|p| p.valid);
                let width = column_names(kind).len();

                match point.map(|p| &p.value) {
                    Some(IndicatorValue::Simple(v)) => row.push(v.to_string()),
                    Some(IndicatorValue::Macd { line, signal }) => {
                        row.push(line.to_string());
                        row.push(signal.to_string());
                    }
                    Some(IndicatorValue::Bollinger {
                        upper,
                        middle,
                        lower,
                    }) => {
                        row.push(upper.to_string());
                        row.push(middle.to_string());
                        row.push(lower.to_string());
                    }
                    None => row.extend(std::iter::repeat_n(String::new(), width)),
                }
            }

            rows.push(row);
        }
    }

    TaggedTable { header, rows }
}
