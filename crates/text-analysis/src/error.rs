//! Error types for text analysis

use thiserror::Error;

/// Errors raised while building analysis components
///
/// Analysis itself never fails; these only surface when a component is
/// constructed from an invalid pattern or when an image cannot be encoded.
#[derive(Debug, Error)]
pub enum TextAnalysisError {
    /// A tokenizer or key-sentence pattern failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The word-cloud raster could not be encoded
    #[error("Image encoding failed: {0}")]
    ImageEncoding(#[from] image::ImageError),
}

/// Result type alias for text analysis operations
pub type Result<T> = std::result::Result<T, TextAnalysisError>;
