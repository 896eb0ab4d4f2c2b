#![forbid(unsafe_code)]

use std::time::Duration;

use skene_source::SourceKind;

use crate::types::PlaybackState;

/// Internal recovery primitive invoked on the adaptive session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecoveryKind {
    NetworkRestart,
    MediaDecode,
}

/// Events published by the playback engine for status display and logging.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// A source was bound and is now loading.
    Bound { uri: String, kind: SourceKind },
    /// The current source (if any) was fully torn down.
    Unbound,
    /// The lifecycle state changed.
    StateChanged { state: PlaybackState },
    /// Intrinsic dimensions became known.
    Dimensions { width: u32, height: u32 },
    /// A reload was scheduled after a transient stream error.
    RetryScheduled { attempt: u32, delay: Duration },
    /// A scheduled reload fired and the media element was asked to reload.
    ReloadIssued { attempt: u32 },
    /// The adaptive session started an internal recovery primitive.
    RecoveryStarted { kind: RecoveryKind },
}
