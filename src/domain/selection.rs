//! Chart request parsing: symbols, timeframe and indicator selection.
//!
//! A [`ChartRequest`] is built once per invocation (CLI flags over config
//! file defaults) and passed by value through the pipeline, so nothing
//! downstream reads ambient state.

use crate::domain::indicator::{bollinger, macd, rsi, IndicatorKind};
use crate::domain::timeframe::{Interval, Period};

pub const MAX_SYMBOLS: usize = 10;

pub const SMA_WINDOWS: [usize; 2] = [20, 50];
pub const EMA_SPANS: [usize; 2] = [20, 50];

/// Everything one pipeline invocation needs to know.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub symbols: Vec<String>,
    pub period: Period,
    pub interval: Interval,
    pub indicators: Vec<IndicatorKind>,
    pub show_volume: bool,
}

/// Parse a comma-separated symbol list: trimmed, uppercased, empty tokens
/// skipped, capped at [`MAX_SYMBOLS`]. Duplicates are kept; a duplicate
/// symbol simply refreshes its entry in the portfolio view.
pub fn parse_symbols(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .take(MAX_SYMBOLS)
        .collect()
}

/// Result of parsing an indicator selection. Unknown tokens are collected
/// for the caller to report; they are never an error.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSelection {
    pub kinds: Vec<IndicatorKind>,
    pub unknown: Vec<String>,
}

/// Expand selection tokens into concrete catalogue entries. `SMA` and
/// `EMA` each expand to their 20- and 50-bar variants. Repeated tokens
/// are deduplicated, order of first appearance preserved.
pub fn parse_indicators(input: &str) -> IndicatorSelection {
    let mut selection = IndicatorSelection::default();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.to_uppercase().as_str() {
            "MACD" => selection.push(IndicatorKind::Macd {
                fast: macd::DEFAULT_FAST,
                slow: macd::DEFAULT_SLOW,
                signal: macd::DEFAULT_SIGNAL,
            }),
            "RSI" => selection.push(IndicatorKind::Rsi(rsi::DEFAULT_PERIOD)),
            "SMA" => {
                for window in SMA_WINDOWS {
                    selection.push(IndicatorKind::Sma(window));
                }
            }
            "EMA" => {
                for span in EMA_SPANS {
                    selection.push(IndicatorKind::Ema(span));
                }
            }
            "BBANDS" => selection.push(IndicatorKind::Bollinger {
                period: bollinger::DEFAULT_PERIOD,
                stddev_mult_x100: bollinger::DEFAULT_MULT_X100,
            }),
            "VWAP" => selection.push(IndicatorKind::Vwap),
            _ => selection.unknown.push(token.to_string()),
        }
    }

    selection
}

impl IndicatorSelection {
    fn push(&mut self, kind: IndicatorKind) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }
}
