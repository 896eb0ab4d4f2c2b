#![forbid(unsafe_code)]

//! Pointer-gesture handling for overlays.
//!
//! The controller is decoupled from any pointer-capture mechanism: the host
//! translates raw pointer events into `begin`/`pointer_move`/`end` calls and
//! the controller owns the per-gesture [`InteractionDelta`] until it is
//! folded into a commit. One gesture per overlay at a time; re-entrant start
//! signals are ignored rather than corrupting an in-flight delta.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use skene_playback::PlaybackState;

use crate::geometry::{
    InteractionDelta, MIN_OVERLAY_EXTENT, Point, ResizeEdges, Size, resolve_geometry,
};
use crate::model::{OverlayId, OverlayPatch, OverlayRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeEdges),
}

#[derive(Debug)]
struct Gesture {
    kind: GestureKind,
    delta: InteractionDelta,
}

/// Committed geometry produced at gesture end, ready to hand to the store.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryCommit {
    pub overlay_id: OverlayId,
    pub position: Point,
    /// Present only for resize gestures; a plain drag leaves size untouched.
    pub size: Option<Size>,
}

impl GeometryCommit {
    /// The `{position, size}` partial for the store's `update`.
    #[must_use]
    pub fn patch(&self) -> OverlayPatch {
        OverlayPatch::geometry(self.position, self.size)
    }
}

/// Binds gesture handling to the overlays currently eligible for
/// interaction and accumulates pointer deltas per overlay.
#[derive(Debug)]
pub struct InteractionController {
    min_size: Size,
    bound: HashSet<OverlayId>,
    active: HashMap<OverlayId, Gesture>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_size: Size::new(MIN_OVERLAY_EXTENT, MIN_OVERLAY_EXTENT),
            bound: HashSet::new(),
            active: HashMap::new(),
        }
    }

    /// Reconcile bindings with the current overlay set and playback phase.
    ///
    /// Bindings for removed or ineligible overlays are released (their
    /// in-flight gestures discarded) before new ones attach, so no handler
    /// outlives the element it was bound to.
    pub fn sync_bindings(&mut self, overlays: &[OverlayRecord], playback: &PlaybackState) {
        let eligible: HashSet<OverlayId> = if playback.overlays_eligible() {
            overlays.iter().map(|o| o.id.clone()).collect()
        } else {
            HashSet::new()
        };

        let stale: Vec<OverlayId> = self.bound.difference(&eligible).cloned().collect();
        for id in &stale {
            if self.active.remove(id).is_some() {
                debug!(overlay = %id, "discarding gesture for unbound overlay");
            }
        }
        self.bound = eligible;
    }

    #[must_use]
    pub fn is_bound(&self, id: &OverlayId) -> bool {
        self.bound.contains(id)
    }

    /// Start a gesture. Returns false (and changes nothing) when the overlay
    /// is not bound or already mid-gesture.
    pub fn begin(&mut self, id: &OverlayId, kind: GestureKind) -> bool {
        if !self.bound.contains(id) {
            trace!(overlay = %id, "gesture start ignored: overlay not bound");
            return false;
        }
        if self.active.contains_key(id) {
            trace!(overlay = %id, "gesture start ignored: gesture already active");
            return false;
        }
        self.active.insert(
            id.clone(),
            Gesture {
                kind,
                delta: InteractionDelta::new(id.clone()),
            },
        );
        true
    }

    /// Fold a pointer movement into the overlay's in-flight delta.
    pub fn pointer_move(&mut self, id: &OverlayId, dx: f64, dy: f64) {
        let Some(gesture) = self.active.get_mut(id) else {
            return;
        };
        match gesture.kind {
            GestureKind::Drag => {
                gesture.delta.dx += dx;
                gesture.delta.dy += dy;
            }
            GestureKind::Resize(edges) => edges.apply_move(&mut gesture.delta, dx, dy),
        }
    }

    /// End the gesture on `record`, folding the delta into a commit. The
    /// live offset is gone once this returns: the next render reflects the
    /// committed value, so the delta is never applied twice.
    pub fn end(&mut self, record: &OverlayRecord) -> Option<GeometryCommit> {
        let gesture = self.active.remove(&record.id)?;
        let resolved = resolve_geometry(
            record.position,
            record.size,
            &gesture.delta,
            self.min_size,
        );
        let size = match gesture.kind {
            GestureKind::Drag => None,
            GestureKind::Resize(_) => Some(resolved.size),
        };
        debug!(
            overlay = %record.id,
            x = resolved.origin.x,
            y = resolved.origin.y,
            "gesture committed"
        );
        Some(GeometryCommit {
            overlay_id: record.id.clone(),
            position: resolved.origin,
            size,
        })
    }

    /// In-flight delta for one overlay, for live rendering.
    #[must_use]
    pub fn live_delta(&self, id: &OverlayId) -> Option<&InteractionDelta> {
        self.active.get(id).map(|g| &g.delta)
    }

    /// Snapshot of all in-flight deltas, keyed by overlay id.
    #[must_use]
    pub fn live_deltas(&self) -> HashMap<OverlayId, InteractionDelta> {
        self.active
            .iter()
            .map(|(id, g)| (id.clone(), g.delta.clone()))
            .collect()
    }

    /// Release every binding and discard in-flight gestures.
    pub fn teardown(&mut self) {
        self.active.clear();
        self.bound.clear();
    }
}

#[cfg(test)]
mod tests {
    use skene_playback::FailureKind;

    use super::*;

    fn record(id: &str) -> OverlayRecord {
        serde_json::from_str(&format!(
            r#"{{
                "_id": "{id}",
                "type": "text",
                "content": "caption",
                "position": {{ "x": 50, "y": 50 }},
                "size": {{ "width": 200, "height": 50 }}
            }}"#
        ))
        .unwrap()
    }

    fn ready_controller(records: &[OverlayRecord]) -> InteractionController {
        let mut controller = InteractionController::new();
        controller.sync_bindings(records, &PlaybackState::Ready);
        controller
    }

    #[test]
    fn drag_commits_offset_position() {
        let rec = record("a");
        let mut controller = ready_controller(std::slice::from_ref(&rec));

        assert!(controller.begin(&rec.id, GestureKind::Drag));
        controller.pointer_move(&rec.id, 10.0, -2.0);
        controller.pointer_move(&rec.id, 5.0, -3.0);

        let commit = controller.end(&rec).unwrap();
        assert_eq!(commit.position, Point::new(65.0, 45.0));
        assert_eq!(commit.size, None);
        // Delta is discarded with the commit.
        assert!(controller.live_delta(&rec.id).is_none());
    }

    #[test]
    fn resize_left_and_bottom_commits_position_and_size() {
        let rec = record("a");
        let mut controller = ready_controller(std::slice::from_ref(&rec));

        let edges = ResizeEdges::LEFT.union(ResizeEdges::BOTTOM);
        assert!(controller.begin(&rec.id, GestureKind::Resize(edges)));
        controller.pointer_move(&rec.id, -10.0, 20.0);

        let commit = controller.end(&rec).unwrap();
        assert_eq!(commit.position, Point::new(40.0, 50.0));
        assert_eq!(commit.size, Some(Size::new(210.0, 70.0)));

        let patch = commit.patch();
        assert_eq!(patch.position, Some(Point::new(40.0, 50.0)));
        assert_eq!(patch.size, Some(Size::new(210.0, 70.0)));
        assert!(patch.content.is_none());
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let rec = record("a");
        let mut controller = ready_controller(std::slice::from_ref(&rec));

        controller.begin(&rec.id, GestureKind::Resize(ResizeEdges::RIGHT));
        controller.pointer_move(&rec.id, -1000.0, 0.0);
        let commit = controller.end(&rec).unwrap();
        assert_eq!(commit.size, Some(Size::new(10.0, 50.0)));
    }

    #[test]
    fn reentrant_start_is_ignored() {
        let rec = record("a");
        let mut controller = ready_controller(std::slice::from_ref(&rec));

        assert!(controller.begin(&rec.id, GestureKind::Drag));
        controller.pointer_move(&rec.id, 15.0, -5.0);

        // A second start mid-gesture must not reset the accumulated delta.
        assert!(!controller.begin(&rec.id, GestureKind::Drag));
        assert!(!controller.begin(&rec.id, GestureKind::Resize(ResizeEdges::TOP)));

        let commit = controller.end(&rec).unwrap();
        assert_eq!(commit.position, Point::new(65.0, 45.0));
    }

    #[test]
    fn gestures_require_eligible_playback() {
        let rec = record("a");
        let mut controller = InteractionController::new();

        controller.sync_bindings(std::slice::from_ref(&rec), &PlaybackState::Loading);
        assert!(!controller.begin(&rec.id, GestureKind::Drag));

        controller.sync_bindings(std::slice::from_ref(&rec), &PlaybackState::Buffering);
        assert!(controller.begin(&rec.id, GestureKind::Drag));
    }

    #[test]
    fn ineligible_playback_releases_bindings_and_gestures() {
        let rec = record("a");
        let mut controller = ready_controller(std::slice::from_ref(&rec));
        controller.begin(&rec.id, GestureKind::Drag);
        controller.pointer_move(&rec.id, 4.0, 4.0);

        controller.sync_bindings(
            std::slice::from_ref(&rec),
            &PlaybackState::Error {
                kind: FailureKind::RetriesExhausted,
                retries: 5,
            },
        );
        assert!(!controller.is_bound(&rec.id));
        assert!(controller.live_delta(&rec.id).is_none());
        assert!(controller.end(&rec).is_none());
    }

    #[test]
    fn removed_overlays_lose_their_bindings() {
        let a = record("a");
        let b = record("b");
        let mut controller = ready_controller(&[a.clone(), b.clone()]);
        controller.begin(&a.id, GestureKind::Drag);

        controller.sync_bindings(std::slice::from_ref(&b), &PlaybackState::Ready);
        assert!(!controller.is_bound(&a.id));
        assert!(controller.is_bound(&b.id));
        assert!(controller.live_delta(&a.id).is_none());
    }

    #[test]
    fn concurrent_gestures_on_distinct_overlays() {
        let a = record("a");
        let b = record("b");
        let mut controller = ready_controller(&[a.clone(), b.clone()]);

        assert!(controller.begin(&a.id, GestureKind::Drag));
        assert!(controller.begin(&b.id, GestureKind::Drag));
        controller.pointer_move(&a.id, 1.0, 0.0);
        controller.pointer_move(&b.id, 0.0, 1.0);

        assert_eq!(controller.end(&a).unwrap().position, Point::new(51.0, 50.0));
        assert_eq!(controller.end(&b).unwrap().position, Point::new(50.0, 51.0));
    }
}
