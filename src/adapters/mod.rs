//! Concrete adapter implementations of the port traits.

pub mod csv_market_data_adapter;
pub mod csv_export_adapter;
pub mod file_config_adapter;
pub mod svg_report_adapter;
