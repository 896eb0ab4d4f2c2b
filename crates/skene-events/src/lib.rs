#![forbid(unsafe_code)]

//! Unified event bus for the skene playback surface.

mod bus;
mod event;
mod overlay;

pub use bus::EventBus;
pub use event::Event;
pub use overlay::OverlayEvent;
pub use skene_playback::PlaybackEvent;
