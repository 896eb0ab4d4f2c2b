#![forbid(unsafe_code)]

use thiserror::Error;

/// Playback engine errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlaybackError {
    /// Every engine handle method can fail this way once the task is gone.
    #[error("engine is shut down")]
    EngineClosed,
}

pub type PlaybackResult<T> = Result<T, PlaybackError>;
