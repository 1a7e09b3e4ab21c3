//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid maturity list.
    #[error("Invalid maturity: '{0}'. Use years, e.g. 0.5 or 1,2,5.")]
    InvalidMaturity(String),

    /// Invalid grid for `curve show`.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Curve evaluation or source error.
    #[error(transparent)]
    Curve(#[from] finec_curves::CurveError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] finec_config::ConfigError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
