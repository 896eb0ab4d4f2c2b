#![forbid(unsafe_code)]

use thiserror::Error;

use crate::model::OverlayId;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverlayError {
    #[error("overlay not found: {0}")]
    NotFound(OverlayId),

    #[error("overlay store: {0}")]
    Store(String),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
