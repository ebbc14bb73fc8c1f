//! Error handling module for funnelviz
//!
//! Only caller-contract violations surface as errors from the engine.
//! Data-quality problems (bad counts, missing order hints) degrade into
//! fallback values and never reach this type.

use thiserror::Error;

/// Main error type for funnelviz
#[derive(Error, Debug)]
pub enum FunnelError {
    /// The input is not a collection of rows at all
    #[error("Invalid input shape: {0}")]
    InvalidShape(String),

    /// IO errors (reading input files, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Style configuration errors (loading, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for funnelviz operations
pub type Result<T> = std::result::Result<T, FunnelError>;

impl FunnelError {
    /// Create an invalid shape error
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Whether this error is a caller-contract violation rather than an
    /// environment failure
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidShape(_))
    }
}
