#![forbid(unsafe_code)]

use skene_overlay::{OverlayId, Point, Size};

/// Overlay lifecycle and editing event.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum OverlayEvent {
    /// A record was created in the store.
    Created { id: OverlayId },
    /// A record was updated in the store.
    Updated { id: OverlayId },
    /// A record was removed from the store.
    Deleted { id: OverlayId },
    /// The selected overlay changed; `None` clears the selection.
    SelectionChanged { id: Option<OverlayId> },
    /// A gesture ended and its geometry was committed locally.
    GeometryCommitted {
        id: OverlayId,
        position: Point,
        size: Option<Size>,
    },
    /// The store rejected a committed geometry; local state is kept.
    CommitRejected { id: OverlayId },
}
