//! Chart report port trait.

use crate::domain::chart::ChartLayerSet;
use crate::domain::error::MarketdashError;
use crate::domain::performance::PerformanceRecord;
use std::path::Path;

/// Port for writing a rendered chart report.
pub trait ReportPort {
    fn write(
        &self,
        chart: &ChartLayerSet,
        performance: &[PerformanceRecord],
        output_path: &Path,
    ) -> Result<(), MarketdashError>;
}
