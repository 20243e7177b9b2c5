//! RSI (Relative Strength Index) indicator.
//!
//! Wilder's smoothing for average gain/loss:
//! - First average: simple mean of the first n gains/losses
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss)), with RSI = 100 when
//! avg_loss == 0 (this includes the flat series where both averages are 0).
//! Output is always within [0, 100].
//!
//! Warmup: first n bars are invalid (n price changes are needed).

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values: Vec<IndicatorPoint> = Vec::with_capacity(bars.len());

    if period == 0 || bars.len() < 2 {
        for bar in bars {
            values.push(invalid_point(bar));
        }
        return IndicatorSeries {
            kind: IndicatorKind::Rsi(period),
            values,
        };
    }

    values.push(invalid_point(&bars[0]));

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..bars.len() {
        let change = bars[i].close - bars[i - 1].close;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        let changes = i;

        if changes < period {
            // still accumulating the seed averages
            avg_gain += gain;
            avg_loss += loss;
            values.push(invalid_point(&bars[i]));
            continue;
        }

        if changes == period {
            avg_gain = (avg_gain + gain) / period as f64;
            avg_loss = (avg_loss + loss) / period as f64;
        } else {
            avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
        }

        values.push(IndicatorPoint {
            timestamp: bars[i].timestamp,
            valid: true,
            value: IndicatorValue::Simple(rsi_from_averages(avg_gain, avg_loss)),
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Rsi(period),
        values,
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

fn invalid_point(bar: &OhlcvBar) -> IndicatorPoint {
    IndicatorPoint {
        timestamp: bar.timestamp,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    }
}
