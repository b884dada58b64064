//! Grid item types and the serializable snapshot layout.
//!
//! A `GridItem` is the central entity: an integer rectangle on the grid plus
//! opaque content-routing metadata. Coordinates and sizes are in grid cells;
//! rectangles are half-open (`[x, x+w) × [y, y+h)`), so touching edges do
//! not overlap.

use serde::{Deserialize, Serialize};

use crate::layout::RectI;

/// A widget placed on the dashboard grid.
///
/// `kind` and `title` are not interpreted by the layout core; the embedding
/// layer routes content by `kind`. The `original_*` fields remember the
/// geometry of the most recent explicit placement (add, drag or resize
/// commit) and anchor repositioning after the grid shrinks and re-expands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Content-routing tag, e.g. "line-chart".
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_w: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_h: Option<i32>,
    /// Transient UI hint set right after any geometry change; the consumer
    /// clears it once the animation window elapses.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_animating: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl GridItem {
    pub fn new(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            kind: String::new(),
            title: String::new(),
            original_x: None,
            original_y: None,
            original_w: None,
            original_h: None,
            is_animating: false,
        }
    }

    pub fn rect(&self) -> RectI {
        RectI { x: self.x, y: self.y, w: self.w, h: self.h }
    }

    pub fn set_rect(&mut self, rect: RectI) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }

    /// Bottom edge in cells (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when both original coordinates were recorded.
    pub fn has_original(&self) -> bool {
        self.original_x.is_some() && self.original_y.is_some()
    }

    /// Record the current geometry as the preferred anchor.
    pub fn capture_original(&mut self) {
        self.original_x = Some(self.x);
        self.original_y = Some(self.y);
        self.original_w = Some(self.w);
        self.original_h = Some(self.h);
    }

    /// Numeric value of the id, for ordering items that never carried an
    /// anchor. Non-numeric ids sort as 0.
    pub fn numeric_id(&self) -> i64 {
        self.id.parse().unwrap_or(0)
    }
}

/// Description of an addable widget type: routing tag, display title and the
/// size a fresh instance should take.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub default_w: i32,
    pub default_h: i32,
}
