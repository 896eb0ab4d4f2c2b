#![forbid(unsafe_code)]

//! Playback lifecycle for skene: an explicit state machine over the single
//! media element, with bounded backoff-paced reconnection for adaptive
//! streams.
//!
//! The engine owns `PlaybackState` and `RetryState` exclusively; the host
//! feeds it lifecycle signals and observes transitions through a broadcast
//! subscription or a watch channel. All media/session capabilities are
//! injected at construction, so the whole crate tests without a rendering
//! surface.

mod engine;
mod error;
mod events;
mod machine;
mod signals;
mod types;

pub mod traits;

pub mod fake;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use engine::{EngineConfig, PlaybackEngine};
pub use error::{PlaybackError, PlaybackResult};
pub use events::{PlaybackEvent, RecoveryKind};
pub use signals::{MediaSignal, SessionErrorKind, SessionSignal};
pub use traits::{
    media::MediaElement,
    session::{AdaptiveSession, AdaptiveSessionFactory},
};
pub use types::{FailureKind, PlaybackState, RetryPolicy, RetryState};
