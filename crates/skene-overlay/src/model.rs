#![forbid(unsafe_code)]

//! Overlay record shape shared with the external store.
//!
//! The wire form is the store's document shape (`_id`, camelCase fields);
//! fields the store may omit carry its creation defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Store-assigned overlay identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(pub String);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    #[default]
    Text,
    Image,
}

/// Text styling; image overlays ignore it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayStyle {
    pub font_size: f64,
    pub color: String,
    pub background_color: String,
    pub font_family: String,
    pub font_weight: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            color: "#ffffff".to_string(),
            background_color: "rgba(0,0,0,0.7)".to_string(),
            font_family: "Arial".to_string(),
            font_weight: "normal".to_string(),
        }
    }
}

fn store_default_position() -> Point {
    Point::new(10.0, 10.0)
}

fn store_default_size() -> Size {
    Size::new(100.0, 30.0)
}

fn default_z_index() -> i32 {
    10
}

/// An overlay as the store returns it. Read-only between edits; the core
/// only proposes updated `position`/`size` at gesture end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRecord {
    #[serde(rename = "_id")]
    pub id: OverlayId,
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    /// Text content, or the image URI for image overlays.
    pub content: String,
    #[serde(default)]
    pub style: OverlayStyle,
    #[serde(default = "store_default_position")]
    pub position: Point,
    #[serde(default = "store_default_size")]
    pub size: Size,
    #[serde(default = "default_z_index")]
    pub z_index: i32,
}

/// A new overlay before the store assigns its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayDraft {
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub content: String,
    #[serde(default)]
    pub style: OverlayStyle,
    pub position: Point,
    pub size: Size,
    pub z_index: i32,
}

impl Default for OverlayDraft {
    /// Editor defaults for a fresh draft.
    fn default() -> Self {
        Self {
            kind: OverlayKind::Text,
            content: String::new(),
            style: OverlayStyle::default(),
            position: Point::new(50.0, 50.0),
            size: Size::new(200.0, 50.0),
            z_index: default_z_index(),
        }
    }
}

/// Partial update sent to the store. Gesture commits only ever populate
/// `position` and `size`; the property editor fills the rest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<OverlayStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl OverlayPatch {
    /// The `{position, size}` partial a gesture commit produces.
    #[must_use]
    pub fn geometry(position: Point, size: Option<Size>) -> Self {
        Self {
            position: Some(position),
            size,
            ..Self::default()
        }
    }
}

impl OverlayRecord {
    /// Optimistic local application of a patch, pending store confirmation.
    pub fn apply(&mut self, patch: &OverlayPatch) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(style) = &patch.style {
            self.style = style.clone();
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_roundtrips_wire_shape() {
        let json = r##"{
            "_id": "66f1a",
            "type": "text",
            "content": "LIVE from the plaza",
            "style": { "fontSize": 24, "color": "#fff000" },
            "position": { "x": 50, "y": 50 },
            "size": { "width": 200, "height": 50 },
            "zIndex": 12
        }"##;
        let record: OverlayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, OverlayId::from("66f1a"));
        assert_eq!(record.kind, OverlayKind::Text);
        assert_eq!(record.style.font_size, 24.0);
        // Omitted style fields fall back to editor defaults.
        assert_eq!(record.style.font_family, "Arial");
        assert_eq!(record.z_index, 12);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["_id"], "66f1a");
        assert_eq!(out["zIndex"], 12);
        assert_eq!(out["style"]["backgroundColor"], "rgba(0,0,0,0.7)");
    }

    #[test]
    fn store_defaults_fill_missing_fields() {
        let record: OverlayRecord =
            serde_json::from_str(r#"{ "_id": "x", "type": "image", "content": "/logo.png" }"#)
                .unwrap();
        assert_eq!(record.position, Point::new(10.0, 10.0));
        assert_eq!(record.size, Size::new(100.0, 30.0));
        assert_eq!(record.z_index, 10);
    }

    #[test]
    fn geometry_patch_serializes_only_geometry() {
        let patch = OverlayPatch::geometry(Point::new(65.0, 45.0), None);
        let out = serde_json::to_value(&patch).unwrap();
        assert_eq!(out["position"]["x"], 65.0);
        assert!(out.get("size").is_none());
        assert!(out.get("content").is_none());
    }

    #[test]
    fn apply_is_partial() {
        let mut record: OverlayRecord =
            serde_json::from_str(r#"{ "_id": "x", "type": "text", "content": "hi" }"#).unwrap();
        record.apply(&OverlayPatch::geometry(
            Point::new(1.0, 2.0),
            Some(Size::new(30.0, 40.0)),
        ));
        assert_eq!(record.position, Point::new(1.0, 2.0));
        assert_eq!(record.size, Size::new(30.0, 40.0));
        assert_eq!(record.content, "hi");
    }
}
