//! Canvas model: drawing elements and their wire shape.
//!
//! This module defines the visual primitives that make up a room's element
//! log. The log order is the server's acceptance order, not creation time;
//! elements carry a client-assigned id so in-place updates stay well-defined
//! across the incremental and full-resync paths.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point in canvas pixel space, serialized as `[x, y]`.
pub type Point = (f64, f64);

/// The kind of a drawing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Freehand stroke following `path`.
    Pencil,
    /// Freehand erase stroke following `path`.
    Eraser,
    /// Straight segment from the origin point across `width`/`height`.
    Line,
    /// Axis-aligned rectangle anchored at the origin point.
    Rectangle,
}

impl ElementKind {
    /// Freehand kinds grow a `path`; shape kinds grow signed extents.
    #[must_use]
    pub fn is_freehand(self) -> bool {
        matches!(self, ElementKind::Pencil | ElementKind::Eraser)
    }
}

/// One visual primitive in a room's element log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingElement {
    /// Stable identifier, assigned client-side at creation before the first
    /// emission, so `updateElement` can always match in place.
    pub id: Uuid,
    /// Shape or stroke kind.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Origin x in canvas pixel space.
    pub offset_x: f64,
    /// Origin y in canvas pixel space.
    pub offset_y: f64,
    /// Ordered points for freehand kinds; at least one while a stroke exists.
    #[serde(default)]
    pub path: Vec<Point>,
    /// Signed horizontal extent for shape kinds; drag direction sets the sign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Signed vertical extent for shape kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Stroke color as a CSS color string.
    pub stroke: String,
}

impl DrawingElement {
    /// Start a new element of `kind` at `origin` with a fresh id.
    ///
    /// Freehand kinds begin with a one-point path; shape kinds gain their
    /// extents as the stroke is extended.
    #[must_use]
    pub fn begin(kind: ElementKind, origin: Point, stroke: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            offset_x: origin.0,
            offset_y: origin.1,
            path: vec![origin],
            width: None,
            height: None,
            stroke: stroke.into(),
        }
    }

    /// Grow the element toward `to`: path append for freehand kinds, signed
    /// extent resize for shape kinds.
    pub fn extend(&mut self, to: Point) {
        if self.kind.is_freehand() {
            self.path.push(to);
        } else {
            self.width = Some(to.0 - self.offset_x);
            self.height = Some(to.1 - self.offset_y);
        }
    }
}
