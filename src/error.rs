use chrono::NaiveDate;
use thiserror::Error;

/// Failures an engine run can produce. All of them are deterministic
/// functions of the input and are reported synchronously.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid parameter: {0}")]
    Parameter(String),

    #[error("no market data for '{symbol}' between {start} and {end}")]
    DataNotFound {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("unsupported algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("duplicate algorithm id: {0}")]
    DuplicateAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
