#![forbid(unsafe_code)]

//! # Skene
//!
//! Facade crate providing a unified API for live-stream playback with
//! interactive overlays.
//!
//! ## Quick start
//!
//! ```ignore
//! use skene::prelude::*;
//!
//! let session = StudioSession::new(media, Some(factory), store, SessionConfig::default());
//! session.attach("https://example.com/live/stream.m3u8")?;
//!
//! // Feed media element lifecycle signals as the host observes them.
//! session.media_signal(MediaSignal::CanPlay)?;
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod events {
    pub use skene_events::*;
}

pub mod overlay {
    pub use skene_overlay::*;
}

pub mod playback {
    pub use skene_playback::*;
}

pub mod source {
    pub use skene_source::*;
}

// ── Session ─────────────────────────────────────────────────────────────

mod config;
mod session;

pub use config::SessionConfig;
pub use session::{SessionError, StudioSession};

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use skene_events::{Event, EventBus, OverlayEvent};
    pub use skene_overlay::{
        GestureKind, InteractionController, OverlayDraft, OverlayId, OverlayPatch, OverlayRecord,
        OverlayStore, ResizeEdges,
    };
    pub use skene_playback::{
        EngineConfig, MediaSignal, PlaybackEngine, PlaybackEvent, PlaybackState, SessionSignal,
    };
    pub use skene_source::{SourceKind, StreamSource, resolve};

    pub use crate::{SessionConfig, SessionError, StudioSession};
}
