//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorValue`: enum for the different indicator output shapes
//! - `IndicatorKind`: the closed catalogue of supported indicators
//! - `IndicatorSeries`: a time series of indicator values
//!
//! [`compute`] dispatches by exhaustive match on `IndicatorKind`, so every
//! catalogue entry has a handler by construction.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod macd;
pub mod bollinger;
pub mod vwap;

pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use vwap::calculate_vwap;

use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub timestamp: NaiveDateTime,
    /// Leading lookback entries are carried but invalid, never zero-filled
    /// into computations.
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Macd { line: f64, signal: f64 },
    Bollinger { upper: f64, middle: f64, lower: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Vwap,
}

impl IndicatorKind {
    /// Oscillators get their own panel below the price chart; everything
    /// else overlays the price layer.
    pub fn is_oscillator(&self) -> bool {
        matches!(self, IndicatorKind::Rsi(_) | IndicatorKind::Macd { .. })
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub values: Vec<IndicatorPoint>,
}

/// Compute one indicator over a cleaned series.
pub fn compute(bars: &[OhlcvBar], kind: IndicatorKind) -> IndicatorSeries {
    match kind {
        IndicatorKind::Sma(window) => sma::calculate_sma(bars, window),
        IndicatorKind::Ema(span) => ema::calculate_ema(bars, span),
        IndicatorKind::Rsi(period) => rsi::calculate_rsi(bars, period),
        IndicatorKind::Macd { fast, slow, signal } => {
            macd::calculate_macd(bars, fast, slow, signal)
        }
        IndicatorKind::Bollinger {
            period,
            stddev_mult_x100,
        } => bollinger::calculate_bollinger(bars, period, stddev_mult_x100),
        IndicatorKind::Vwap => vwap::calculate_vwap(bars),
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(window) => write!(f, "SMA({})", window),
            IndicatorKind::Ema(span) => write!(f, "EMA({})", span),
            IndicatorKind::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorKind::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorKind::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BBANDS({},{})", period, mult)
            }
            IndicatorKind::Vwap => write!(f, "VWAP"),
        }
    }
}
