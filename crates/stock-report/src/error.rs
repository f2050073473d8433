//! Error types for stock report operations

use thiserror::Error;

/// Stock report specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// The primary provider knows no company under this ticker
    #[error("No company found for ticker {0}")]
    NotFound(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A data provider failed or returned something unusable
    #[error("{provider} error: {message}")]
    Provider {
        provider: String,
        message: String,
    },

    /// A single record could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl StockError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;
