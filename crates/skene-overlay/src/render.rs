#![forbid(unsafe_code)]

//! Pure projection of overlay records into display nodes.

use std::collections::{HashMap, HashSet};

use skene_playback::PlaybackState;

use crate::geometry::{GeometryModel, InteractionDelta, Rect};
use crate::model::{OverlayId, OverlayKind, OverlayRecord, OverlayStyle};

/// One overlay ready for compositing.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayNode {
    pub id: OverlayId,
    pub kind: OverlayKind,
    pub content: String,
    /// Committed geometry offset by the in-flight gesture delta, if any.
    pub frame: Rect,
    pub z_index: i32,
    pub selected: bool,
    /// Image overlays whose asset failed to load stay in the list but are
    /// not drawn.
    pub hidden: bool,
    pub style: OverlayStyle,
}

/// Project records into draw order. Returns nothing before the stream is
/// attached (`Idle`/`Loading`); otherwise nodes sorted by `z_index`
/// ascending, ties keeping record order.
#[must_use]
pub fn render(
    overlays: &[OverlayRecord],
    selected: Option<&OverlayId>,
    live_deltas: &HashMap<OverlayId, InteractionDelta>,
    playback: &PlaybackState,
    broken_images: &HashSet<String>,
) -> Vec<OverlayNode> {
    if matches!(playback, PlaybackState::Idle | PlaybackState::Loading) {
        return Vec::new();
    }

    let mut nodes: Vec<OverlayNode> = overlays
        .iter()
        .map(|record| {
            let geometry = GeometryModel {
                committed: Rect {
                    origin: record.position,
                    size: record.size,
                },
                pending: live_deltas.get(&record.id).cloned(),
            };
            let frame = geometry.resolved();
            OverlayNode {
                id: record.id.clone(),
                kind: record.kind,
                content: record.content.clone(),
                frame,
                z_index: record.z_index,
                selected: selected == Some(&record.id),
                hidden: record.kind == OverlayKind::Image
                    && broken_images.contains(&record.content),
                style: record.style.clone(),
            }
        })
        .collect();
    nodes.sort_by_key(|n| n.z_index);
    nodes
}
