//! Domain error types.

/// Top-level error type for marketdash.
///
/// Per-symbol failures (fetch, empty series, insufficient closes) are
/// reported and skipped by the pipeline; they never abort the batch.
#[derive(Debug, thiserror::Error)]
pub enum MarketdashError {
    #[error("fetch failed for {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    #[error("no rows survived cleaning for {symbol}")]
    EmptySeries { symbol: String },

    #[error("required column missing: {column}")]
    MissingColumn { column: String },

    #[error("insufficient data for {symbol}: {closes} usable closes, need at least 2")]
    InsufficientData { symbol: String, closes: usize },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MarketdashError> for std::process::ExitCode {
    fn from(err: &MarketdashError) -> Self {
        let code: u8 = match err {
            MarketdashError::Io(_) => 1,
            MarketdashError::ConfigParse { .. }
            | MarketdashError::ConfigMissing { .. }
            | MarketdashError::ConfigInvalid { .. } => 2,
            MarketdashError::Fetch { .. } | MarketdashError::Export { .. } => 3,
            MarketdashError::EmptySeries { .. } | MarketdashError::MissingColumn { .. } => 4,
            MarketdashError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
