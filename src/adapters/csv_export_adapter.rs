//! CSV export adapter: serializes the flattened tagged table.

use crate::domain::error::MarketdashError;
use crate::domain::export::TaggedTable;
use std::path::Path;

pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a table to UTF-8 CSV text, header row first.
    pub fn to_csv_string(&self, table: &TaggedTable) -> Result<String, MarketdashError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());

        wtr.write_record(&table.header)
            .map_err(|e| MarketdashError::Export {
                reason: format!("failed to write header: {}", e),
            })?;
        for row in &table.rows {
            wtr.write_record(row).map_err(|e| MarketdashError::Export {
                reason: format!("failed to write row: {}", e),
            })?;
        }

        let bytes = wtr.into_inner().map_err(|e| MarketdashError::Export {
            reason: format!("failed to flush: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| MarketdashError::Export {
            reason: format!("invalid UTF-8 in output: {}", e),
        })
    }

    pub fn write_file(&self, table: &TaggedTable, path: &Path) -> Result<(), MarketdashError> {
        let content = self.to_csv_string(table)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for CsvExportAdapter {
    fn default() -> Self {
        Self::new()
    }
}
