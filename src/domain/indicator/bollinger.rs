//! Bollinger Bands indicator.
//!
//! - Middle: Simple Moving Average over n periods
//! - Upper: middle + (multiplier * stddev)
//! - Lower: middle - (multiplier * stddev)
//!
//! StdDev is population standard deviation (divides by N, not N-1), so
//! upper >= middle >= lower wherever the bands are defined.
//!
//! Default parameters: period=20, multiplier=2.0.
//! Warmup: first (period-1) bars are invalid.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let kind = IndicatorKind::Bollinger {
        period,
        stddev_mult_x100,
    };

    if period == 0 {
        return IndicatorSeries {
            kind,
            values: Vec::new(),
        };
    }

    let mult = stddev_mult_x100 as f64 / 100.0;
    let warmup = period - 1;
    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let valid = i >= warmup;

        let (upper, middle, lower) = if valid {
            let window = &bars[i + 1 - period..=i];
            let middle: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
            let variance: f64 = window
                .iter()
                .map(|b| {
                    let diff = b.close - middle;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let band = mult * variance.sqrt();

            (middle + band, middle, middle - band)
        } else {
            (0.0, 0.0, 0.0)
        };

        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid,
            value: IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            },
        });
    }

    IndicatorSeries { kind, values }
}

pub fn calculate_bollinger_default(bars: &[OhlcvBar]) -> IndicatorSeries {
    calculate_bollinger(bars, DEFAULT_PERIOD, DEFAULT_MULT_X100)
}
