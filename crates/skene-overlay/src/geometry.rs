#![forbid(unsafe_code)]

//! Overlay geometry in layout pixels.
//!
//! All coordinates are plain scalars in the viewport's layout space; the
//! compositing surface maps them to device pixels.

use serde::{Deserialize, Serialize};

use crate::model::OverlayId;

/// Minimum overlay extent per axis, enforced when a resize commits.
pub const MIN_OVERLAY_EXTENT: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

/// Pending interactive offset for one overlay, accumulated over a gesture
/// and discarded after being folded into a committed position/size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionDelta {
    pub overlay_id: OverlayId,
    pub dx: f64,
    pub dy: f64,
    pub width_delta: f64,
    pub height_delta: f64,
}

impl InteractionDelta {
    #[must_use]
    pub fn new(overlay_id: OverlayId) -> Self {
        Self {
            overlay_id,
            ..Self::default()
        }
    }
}

/// Which edges a resize gesture grips. Left/top edges shift the overlay
/// origin as they grow the box toward negative space; right/bottom do not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ResizeEdges {
    pub const LEFT: Self = Self {
        left: true,
        right: false,
        top: false,
        bottom: false,
    };
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
        top: false,
        bottom: false,
    };
    pub const TOP: Self = Self {
        left: false,
        right: false,
        top: true,
        bottom: false,
    };
    pub const BOTTOM: Self = Self {
        left: false,
        right: false,
        top: false,
        bottom: true,
    };

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            top: self.top || other.top,
            bottom: self.bottom || other.bottom,
        }
    }

    /// Fold a pointer movement into `delta` according to the gripped edges.
    pub fn apply_move(self, delta: &mut InteractionDelta, dx: f64, dy: f64) {
        if self.left {
            delta.width_delta -= dx;
            delta.dx += dx;
        }
        if self.right {
            delta.width_delta += dx;
        }
        if self.top {
            delta.height_delta -= dy;
            delta.dy += dy;
        }
        if self.bottom {
            delta.height_delta += dy;
        }
    }
}

/// Fold a delta into committed geometry, clamping each axis to `min`.
#[must_use]
pub fn resolve_geometry(position: Point, size: Size, delta: &InteractionDelta, min: Size) -> Rect {
    Rect {
        origin: Point::new(position.x + delta.dx, position.y + delta.dy),
        size: Size::new(
            (size.width + delta.width_delta).max(min.width),
            (size.height + delta.height_delta).max(min.height),
        ),
    }
}

/// One revision of an overlay's geometry: the committed frame plus the
/// pending interactive delta, if a gesture is in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryModel {
    pub committed: Rect,
    pub pending: Option<InteractionDelta>,
}

impl GeometryModel {
    /// The frame to display right now: committed geometry offset by any
    /// in-flight delta.
    #[must_use]
    pub fn resolved(&self) -> Rect {
        match &self.pending {
            Some(delta) => resolve_geometry(
                self.committed.origin,
                self.committed.size,
                delta,
                Size::new(MIN_OVERLAY_EXTENT, MIN_OVERLAY_EXTENT),
            ),
            None => self.committed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(id: &str) -> InteractionDelta {
        InteractionDelta::new(OverlayId::from(id))
    }

    #[test]
    fn drag_offsets_origin_only() {
        let mut d = delta("a");
        d.dx = 15.0;
        d.dy = -5.0;
        let rect = resolve_geometry(
            Point::new(50.0, 50.0),
            Size::new(200.0, 50.0),
            &d,
            Size::new(10.0, 10.0),
        );
        assert_eq!(rect.origin, Point::new(65.0, 45.0));
        assert_eq!(rect.size, Size::new(200.0, 50.0));
    }

    #[test]
    fn left_and_bottom_edges_resize_with_origin_shift() {
        let mut d = delta("a");
        ResizeEdges::LEFT.apply_move(&mut d, -10.0, 0.0);
        ResizeEdges::BOTTOM.apply_move(&mut d, 0.0, 20.0);
        let rect = resolve_geometry(
            Point::new(50.0, 50.0),
            Size::new(200.0, 50.0),
            &d,
            Size::new(10.0, 10.0),
        );
        assert_eq!(rect.origin, Point::new(40.0, 50.0));
        assert_eq!(rect.size, Size::new(210.0, 70.0));
    }

    #[test]
    fn corner_grip_combines_edges() {
        let mut d = delta("a");
        let corner = ResizeEdges::LEFT.union(ResizeEdges::TOP);
        corner.apply_move(&mut d, -4.0, -6.0);
        let rect = resolve_geometry(
            Point::new(100.0, 100.0),
            Size::new(40.0, 40.0),
            &d,
            Size::new(10.0, 10.0),
        );
        assert_eq!(rect.origin, Point::new(96.0, 94.0));
        assert_eq!(rect.size, Size::new(44.0, 46.0));
    }

    #[test]
    fn size_clamps_to_minimum_per_axis() {
        let mut d = delta("a");
        ResizeEdges::RIGHT.apply_move(&mut d, -500.0, 0.0);
        ResizeEdges::BOTTOM.apply_move(&mut d, 0.0, -500.0);
        let rect = resolve_geometry(
            Point::new(0.0, 0.0),
            Size::new(200.0, 50.0),
            &d,
            Size::new(10.0, 10.0),
        );
        assert_eq!(rect.size, Size::new(10.0, 10.0));
    }

    #[test]
    fn geometry_model_resolves_pending_delta() {
        let mut model = GeometryModel {
            committed: Rect {
                origin: Point::new(10.0, 10.0),
                size: Size::new(100.0, 30.0),
            },
            pending: None,
        };
        assert_eq!(model.resolved(), model.committed);

        let mut d = delta("a");
        d.dx = 5.0;
        model.pending = Some(d);
        assert_eq!(model.resolved().origin, Point::new(15.0, 10.0));
    }
}
