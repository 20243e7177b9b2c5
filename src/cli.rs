//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::csv_market_data_adapter::CsvMarketDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_report_adapter::SvgReportAdapter;
use crate::domain::chart::compose;
use crate::domain::error::MarketdashError;
use crate::domain::export::flatten;
use crate::domain::performance::{summarize, PerformanceRecord};
use crate::domain::pipeline::assemble;
use crate::domain::selection::{parse_indicators, parse_symbols, ChartRequest};
use crate::domain::timeframe::{Interval, Period};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_PERIOD: &str = "3mo";
pub const DEFAULT_INTERVAL: &str = "1d";
pub const DEFAULT_INDICATORS: &str = "MACD,RSI";

#[derive(Parser, Debug)]
#[command(name = "marketdash", about = "Multi-symbol OHLCV indicator dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the chart, performance summary and optional exports
    Chart {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated list of up to 10 symbols
        #[arg(short, long)]
        symbols: Option<String>,
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        interval: Option<String>,
        /// Comma-separated indicator names (MACD,RSI,SMA,EMA,BBANDS,VWAP)
        #[arg(short, long)]
        indicators: Option<String>,
        #[arg(long)]
        hide_volume: bool,
        /// Write the rendered chart to this SVG file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the combined tagged table to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List symbols with data available for an interval
    ListSymbols {
        #[arg(long)]
        interval: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Chart {
            config,
            symbols,
            period,
            interval,
            indicators,
            hide_volume,
            output,
            export,
            data_dir,
        } => run_chart(
            config.as_ref(),
            symbols.as_deref(),
            period.as_deref(),
            interval.as_deref(),
            indicators.as_deref(),
            hide_volume,
            output.as_ref(),
            export.as_ref(),
            data_dir.as_ref(),
        ),
        Command::ListSymbols {
            interval,
            config,
            data_dir,
        } => run_list_symbols(interval.as_deref(), config.as_ref(), data_dir.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = MarketdashError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Resolve a chart request from CLI flags over config file defaults.
/// Returns the request plus any unrecognized indicator tokens, which the
/// caller reports as warnings rather than failing.
pub fn build_chart_request(
    config: Option<&dyn ConfigPort>,
    symbols: Option<&str>,
    period: Option<&str>,
    interval: Option<&str>,
    indicators: Option<&str>,
    hide_volume: bool,
) -> Result<(ChartRequest, Vec<String>), MarketdashError> {
    let config_string = |key: &str| config.and_then(|c| c.get_string("chart", key));

    let symbols_input = match symbols.map(str::to_string).or_else(|| config_string("symbols")) {
        Some(s) => s,
        None => {
            return Err(MarketdashError::ConfigMissing {
                section: "chart".into(),
                key: "symbols".into(),
            });
        }
    };

    let period_token = period
        .map(str::to_string)
        .or_else(|| config_string("period"))
        .unwrap_or_else(|| DEFAULT_PERIOD.to_string());
    let period = Period::parse(&period_token).ok_or_else(|| MarketdashError::ConfigInvalid {
        section: "chart".into(),
        key: "period".into(),
        reason: format!("unknown period token '{period_token}'"),
    })?;

    let interval_token = interval
        .map(str::to_string)
        .or_else(|| config_string("interval"))
        .unwrap_or_else(|| DEFAULT_INTERVAL.to_string());
    let interval =
        Interval::parse(&interval_token).ok_or_else(|| MarketdashError::ConfigInvalid {
            section: "chart".into(),
            key: "interval".into(),
            reason: format!("unknown interval token '{interval_token}'"),
        })?;

    let indicators_input = indicators
        .map(str::to_string)
        .or_else(|| config_string("indicators"))
        .unwrap_or_else(|| DEFAULT_INDICATORS.to_string());
    let selection = parse_indicators(&indicators_input);

    let show_volume = if hide_volume {
        false
    } else {
        config
            .map(|c| c.get_bool("chart", "show_volume", true))
            .unwrap_or(true)
    };

    Ok((
        ChartRequest {
            symbols: parse_symbols(&symbols_input),
            period,
            interval,
            indicators: selection.kinds,
            show_volume,
        },
        selection.unknown,
    ))
}

pub fn resolve_data_dir(flag: Option<&PathBuf>, config: Option<&dyn ConfigPort>) -> PathBuf {
    flag.cloned()
        .or_else(|| {
            config
                .and_then(|c| c.get_string("data", "base_path"))
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from("./data"))
}

#[allow(clippy::too_many_arguments)]
fn run_chart(
    config_path: Option<&PathBuf>,
    symbols: Option<&str>,
    period: Option<&str>,
    interval: Option<&str>,
    indicators: Option<&str>,
    hide_volume: bool,
    output_path: Option<&PathBuf>,
    export_path: Option<&PathBuf>,
    data_dir: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load config if given
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };
    let config: Option<&dyn ConfigPort> = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    // Stage 2: Build the request
    let (request, unknown) =
        match build_chart_request(config, symbols, period, interval, indicators, hide_volume) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
    for token in &unknown {
        eprintln!("Warning: ignoring unknown indicator '{token}'");
    }
    if request.symbols.is_empty() {
        eprintln!("error: no symbols requested");
        return ExitCode::from(4);
    }

    // Stage 3: Fetch, validate and compute per symbol
    eprintln!(
        "Fetching {} symbols ({} {})...",
        request.symbols.len(),
        request.period,
        request.interval
    );
    let data_port = CsvMarketDataAdapter::new(resolve_data_dir(data_dir, config));
    let result = assemble(&data_port, &request);

    if result.view.is_empty() {
        eprintln!("error: no usable data for any requested symbol");
        return ExitCode::from(5);
    }
    if !result.skipped.is_empty() {
        eprintln!(
            "Charting {} of {} symbols",
            result.view.len(),
            result.view.len() + result.skipped.len()
        );
    }

    // Stage 4: Aggregate into chart layers
    let chart = compose(&result.view, &request.indicators, request.show_volume);

    // Stage 5: Performance summary
    let mut records: Vec<PerformanceRecord> = Vec::with_capacity(result.view.len());
    for dataset in result.view.iter() {
        match summarize(dataset) {
            Ok(record) => {
                println!("{}: {:+.2}%", record.symbol, record.percent_return);
                records.push(record);
            }
            Err(e) => eprintln!("Warning: {e}"),
        }
    }

    // Stage 6: Optional CSV export
    if let Some(path) = export_path {
        let table = flatten(&result.view, &request.indicators);
        if let Err(e) = CsvExportAdapter::new().write_file(&table, path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Wrote export to {}", path.display());
    }

    // Stage 7: Optional SVG report
    if let Some(path) = output_path {
        if let Err(e) = SvgReportAdapter::new().write(&chart, &records, path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Wrote chart to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_list_symbols(
    interval: Option<&str>,
    config_path: Option<&PathBuf>,
    data_dir: Option<&PathBuf>,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(code) => return code,
        },
        None => None,
    };
    let config: Option<&dyn ConfigPort> = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    let token = interval.map(str::to_string).unwrap_or_else(|| {
        config
            .and_then(|c| c.get_string("chart", "interval"))
            .unwrap_or_else(|| DEFAULT_INTERVAL.to_string())
    });
    let interval = match Interval::parse(&token) {
        Some(i) => i,
        None => {
            eprintln!("error: unknown interval token '{token}'");
            return ExitCode::from(2);
        }
    };

    let data_port = CsvMarketDataAdapter::new(resolve_data_dir(data_dir, config));
    match data_port.list_symbols(interval) {
        Ok(symbols) => {
            for symbol in symbols {
                println!("{symbol}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
