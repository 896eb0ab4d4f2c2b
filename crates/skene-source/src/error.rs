#![forbid(unsafe_code)]

use thiserror::Error;

/// Source resolution and conversion boundary errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("conversion service rejected {uri}: {reason}")]
    ConversionRejected { uri: String, reason: String },

    #[error("conversion service unreachable: {0}")]
    ConversionUnavailable(String),
}

pub type SourceResult<T> = Result<T, SourceError>;
