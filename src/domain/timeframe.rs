//! Period and interval tokens for a chart request.

use chrono::Duration;
use std::fmt;

/// How far back from the newest bar the fetched window extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    Max,
}

impl Period {
    pub fn parse(token: &str) -> Option<Period> {
        match token.trim().to_lowercase().as_str() {
            "1mo" => Some(Period::OneMonth),
            "3mo" => Some(Period::ThreeMonths),
            "6mo" => Some(Period::SixMonths),
            "1y" => Some(Period::OneYear),
            "2y" => Some(Period::TwoYears),
            "5y" => Some(Period::FiveYears),
            "max" => Some(Period::Max),
            _ => None,
        }
    }

    /// Window length counted back from the newest bar. `None` is unbounded.
    pub fn lookback(&self) -> Option<Duration> {
        match self {
            Period::OneMonth => Some(Duration::days(30)),
            Period::ThreeMonths => Some(Duration::days(91)),
            Period::SixMonths => Some(Duration::days(182)),
            Period::OneYear => Some(Duration::days(365)),
            Period::TwoYears => Some(Duration::days(730)),
            Period::FiveYears => Some(Duration::days(1826)),
            Period::Max => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::Max => "max",
        };
        write!(f, "{}", token)
    }
}

/// Bar granularity of the fetched series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Hourly,
    ThirtyMinutes,
    FifteenMinutes,
}

impl Interval {
    pub fn parse(token: &str) -> Option<Interval> {
        match token.trim().to_lowercase().as_str() {
            "1d" => Some(Interval::Daily),
            "1h" => Some(Interval::Hourly),
            "30m" => Some(Interval::ThirtyMinutes),
            "15m" => Some(Interval::FifteenMinutes),
            _ => None,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Interval::Daily => "1d",
            Interval::Hourly => "1h",
            Interval::ThirtyMinutes => "30m",
            Interval::FifteenMinutes => "15m",
        };
        write!(f, "{}", token)
    }
}
