//! Market data access port trait.

use crate::domain::error::MarketdashError;
use crate::domain::timeframe::{Interval, Period};
use crate::domain::validate::RawSeries;

pub trait MarketDataPort {
    /// Fetch the raw OHLCV table for one symbol. The returned series is
    /// uncleaned; callers pass it through the validator.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<RawSeries, MarketdashError>;

    fn list_symbols(&self, interval: Interval) -> Result<Vec<String>, MarketdashError>;
}
