//! Volume-Weighted Average Price indicator.
//!
//! Cumulative sum(close * volume) / sum(volume) from the first bar of the
//! fetched window to each point. The window is never reset per session.
//! Bars before any volume has traded are invalid rather than a division
//! by zero.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_vwap(bars: &[OhlcvBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut cum_traded = 0.0;
    let mut cum_volume = 0.0;

    for bar in bars {
        cum_traded += bar.traded_value();
        cum_volume += bar.volume as f64;

        let valid = cum_volume > 0.0;
        let vwap = if valid { cum_traded / cum_volume } else { 0.0 };
        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid,
            value: IndicatorValue::Simple(vwap),
        });
    }

    IndicatorSeries {
        kind: IndicatorKind::Vwap,
        values,
    }
}
