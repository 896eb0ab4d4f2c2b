#![forbid(unsafe_code)]

/// Lifecycle signals emitted by the media element, in emission order.
///
/// Mirrors the HTML media event set the host observes (`loadedmetadata`,
/// `canplay`, `error`, `play`, `playing`, `pause`, `waiting`).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum MediaSignal {
    LoadStart,
    MetadataReady { width: u32, height: u32 },
    CanPlay,
    Play,
    Playing,
    Pause,
    Waiting,
    Error { detail: String },
}

/// How a fatal adaptive-session error is classified for recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionErrorKind {
    /// Manifest/segment load failure; the session restarts its network load.
    Network,
    /// Decode failure; the session attempts media-decode recovery.
    Media,
    /// Outside recovery policy; surfaces as a terminal playback error.
    Other,
}

/// Signals from the adaptive-playback session (when native manifest support
/// is absent and a session drives the media element instead).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum SessionSignal {
    ManifestParsed,
    FatalError {
        kind: SessionErrorKind,
        detail: String,
    },
}
