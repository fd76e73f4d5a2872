//! Domain error types.

/// Top-level error type for stratscan.
#[derive(Debug, thiserror::Error)]
pub enum StratscanError {
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

    #[error("unknown strategy '{key}'")]
    UnknownStrategy { key: String },

    #[error("unknown timeframe '{key}'")]
    UnknownTimeframe { key: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("no market data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient data: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StratscanError> for std::process::ExitCode {
    fn from(err: &StratscanError) -> Self {
        let code: u8 = match err {
            StratscanError::Io(_) | StratscanError::Report { .. } => 1,
            StratscanError::ConfigParse { .. }
            | StratscanError::ConfigMissing { .. }
            | StratscanError::ConfigInvalid { .. } => 2,
            StratscanError::UnknownStrategy { .. }
            | StratscanError::UnknownTimeframe { .. }
            | StratscanError::InvalidParameter { .. } => 3,
            StratscanError::Data { .. } => 4,
            StratscanError::NoData { .. } | StratscanError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
