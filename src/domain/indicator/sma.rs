//! Simple Moving Average indicator.
//!
//! Arithmetic mean of close over the trailing n bars, maintained as a
//! running sum. Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], window: usize) -> IndicatorSeries {
    if window == 0 {
        return IndicatorSeries {
            kind: IndicatorKind::Sma(window),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= window {
            sum -= bars[i - window].close;
        }

        let valid = i + 1 >= window;
        let mean = if valid { sum / window as f64 } else { 0.0 };
        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid,
            value: IndicatorValue::Simple(mean),
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Sma(window),
        values,
    }
}
