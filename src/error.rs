use thiserror::Error;

/// Errors raised by the series builder and configuration parsing.
///
/// Malformed numbers or years inside rows are *not* errors: they are absorbed
/// as `None` or dropped rows. Everything here signals a wiring mistake in the
/// calling code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("unknown presentation mode {0:?} (expected trend, latest or pie)")]
    UnknownMode(String),

    #[error("unknown chart type {0:?} (expected bar, column, line or pie)")]
    UnknownChartKind(String),

    #[error("invalid reference year {0}")]
    InvalidReferenceYear(i32),
}

pub type Result<T> = std::result::Result<T, ChartError>;
