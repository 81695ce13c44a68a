use thiserror::Error;

use crate::config::ConfigError;

/// A single provider row that could not be normalized. Never fatal: the row
/// is reported as a warning and skipped.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{field} is not a finite amount: {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },

    #[error("{field} is too large to format as a yearly salary: {value}")]
    AmountOutOfRange { field: &'static str, value: f64 },
}

/// Failures that abort the whole invocation.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid arguments")]
    InvalidArguments,

    #[error("{name} must be {expected}, got {value:?}")]
    InvalidInteger {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0:#}")]
    Provider(anyhow::Error),

    #[error("All queries failed: {}", .0.join("; "))]
    AllQueriesFailed(Vec<String>),
}
