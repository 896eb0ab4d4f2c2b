#![forbid(unsafe_code)]

//! Stream source classification for the skene playback pipeline.
//!
//! A requested media URI is classified exactly once into a playback strategy
//! before any playback attempt:
//!
//! - URIs whose path ends in a manifest extension (`.m3u8`) are adaptive
//!   streams and go through an adaptive-playback session when the media
//!   element has no native manifest support.
//! - Camera transport schemes (`rtsp://`, `rtsps://`) cannot be played by a
//!   media element at all; they must pass through the external conversion
//!   service first, and only the resulting manifest URI comes back here.
//! - Everything else is treated as a progressive file.

mod convert;
mod error;
mod resolver;

pub use convert::{ConversionService, ConvertedStream};
pub use error::{SourceError, SourceResult};
pub use resolver::{SourceKind, StreamSource, resolve};
