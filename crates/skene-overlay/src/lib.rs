#![forbid(unsafe_code)]

//! Overlay compositing for skene: the record model shared with the external
//! store, pointer-gesture geometry editing, and the pure render projection.
//!
//! The store owns overlay records; this crate only reads them and proposes
//! updated geometry at gesture end. In-flight gestures live entirely in
//! [`InteractionController`] as [`InteractionDelta`]s and are folded into a
//! committed position/size exactly once.

mod error;
mod gesture;
mod geometry;
mod memory;
mod model;
mod render;
mod store;

pub use error::{OverlayError, OverlayResult};
pub use gesture::{GeometryCommit, GestureKind, InteractionController};
pub use geometry::{
    GeometryModel, InteractionDelta, MIN_OVERLAY_EXTENT, Point, Rect, ResizeEdges, Size,
    resolve_geometry,
};
pub use memory::MemoryStore;
pub use model::{OverlayDraft, OverlayId, OverlayKind, OverlayPatch, OverlayRecord, OverlayStyle};
pub use render::{OverlayNode, render};
pub use store::OverlayStore;
