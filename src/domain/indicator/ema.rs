//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seeded with the first close, then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k). Defined from the first bar.

use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], span: usize) -> IndicatorSeries {
    if span == 0 || bars.is_empty() {
        return IndicatorSeries {
            kind: IndicatorKind::Ema(span),
            values: Vec::new(),
        };
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let values = ema_values(&closes, span)
        .into_iter()
        .zip(bars)
        .map(|(ema, bar)| IndicatorPoint {
            timestamp: bar.timestamp,
            valid: true,
            value: IndicatorValue::Simple(ema),
        })
        .collect();

    IndicatorSeries {
        kind: IndicatorKind::Ema(span),
        values,
    }
}

/// Seed-first EMA recurrence over a raw value slice. Also used for the
/// MACD line and signal, which smooth derived series rather than closes.
pub(crate) fn ema_values(input: &[f64], span: usize) -> Vec<f64> {
    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(input.len());
    let mut ema = 0.0;

    for (i, &value) in input.iter().enumerate() {
        ema = if i == 0 { value } else { value * k + ema * (1.0 - k) };
        out.push(ema);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                symbol: "TEST".into(),
                timestamp: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn ema_seed_is_first_close() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_ema(&bars, 3);

        assert!(series.values[0].valid);
        if let IndicatorValue::Simple(v) = series.values[0].value {
            assert!((v - 10.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ema_recurrence() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0]);
        let series = calculate_ema(&bars, 3);

        let k = 2.0 / 4.0;
        let mut expected = 10.0;
        for (i, point) in series.values.iter().enumerate() {
            if i > 0 {
                expected = bars[i].close * k + expected * (1.0 - k);
            }
            if let IndicatorValue::Simple(v) = point.value {
                assert!((v - expected).abs() < 1e-10, "mismatch at index {}", i);
            }
        }
    }

    #[test]
    fn ema_all_points_defined() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_ema(&bars, 20);

        assert_eq!(series.values.len(), 5);
        assert!(series.values.iter().all(|p| p.valid));
    }

    #[test]
    fn ema_constant_series() {
        let bars = make_bars(&[100.0; 10]);
        let series = calculate_ema(&bars, 5);

        for point in &series.values {
            if let IndicatorValue::Simple(v) = point.value {
                assert!((v - 100.0).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn ema_smoothing_factor() {
        let span = 10;
        let k = 2.0 / (span as f64 + 1.0);
        assert!((k - 2.0 / 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ema_empty_bars() {
        let series = calculate_ema(&[], 3);
        assert!(series.values.is_empty());
    }

    #[test]
    fn ema_zero_span() {
        let bars = make_bars(&[10.0, 20.0]);
        let series = calculate_ema(&bars, 0);
        assert!(series.values.is_empty());
    }

    #[test]
    fn ema_kind() {
        let bars = make_bars(&[10.0]);
        let series = calculate_ema(&bars, 20);
        assert_eq!(series.kind, IndicatorKind::Ema(20));
    }
}
