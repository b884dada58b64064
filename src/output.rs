//! Output types for frontend consumption.
//!
//! These structs are serialized to JSON and sent to the rendering side.
//! Cell geometry is translated into pixel bounds here so the frontend can
//! absolutely position widgets without knowing the box model: a widget's
//! pixel origin is `cell * (grid_size + margin)` and its extent spans the
//! content boxes plus the interior margins.

use serde::Serialize;

use crate::interact::{grid_to_pixel, span_pixel_size};
use crate::item::GridItem;
use crate::layout::{GridConfig, GridDimensions, RectI};

/// A rendered widget ready for the frontend to display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutput {
    pub id: String,
    /// Widget kind: "bar-chart", "table", etc. Routed by the frontend.
    pub kind: String,
    pub title: String,
    /// Grid-cell rectangle
    pub cell: RectI,
    /// Pixel rectangle, relative to the padded grid content box
    pub bounds: RectI,
    /// Whether this widget should animate to its position
    pub is_animating: bool,
}

/// The combined output sent to the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOutput {
    pub dimensions: GridDimensions,
    pub items: Vec<ItemOutput>,
    /// The in-flight drag/resize candidate, when an interaction is live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<ItemOutput>,
    /// Set when the last repair ran out of budget and overlaps remain
    #[serde(skip_serializing_if = "is_false")]
    pub degraded: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Pixel bounds of a single item under the given box model.
pub fn item_bounds(item: &GridItem, cfg: &GridConfig) -> RectI {
    RectI {
        x: grid_to_pixel(item.x, cfg),
        y: grid_to_pixel(item.y, cfg),
        w: span_pixel_size(item.w, cfg),
        h: span_pixel_size(item.h, cfg),
    }
}

pub fn item_output(item: &GridItem, cfg: &GridConfig) -> ItemOutput {
    ItemOutput {
        id: item.id.clone(),
        kind: item.kind.clone(),
        title: item.title.clone(),
        cell: item.rect(),
        bounds: item_bounds(item, cfg),
        is_animating: item.is_animating,
    }
}

pub fn dashboard_output(
    items: &[GridItem],
    preview: Option<&GridItem>,
    dims: GridDimensions,
    cfg: &GridConfig,
    degraded: bool,
) -> DashboardOutput {
    DashboardOutput {
        dimensions: dims,
        items: items.iter().map(|it| item_output(it, cfg)).collect(),
        preview: preview.map(|it| item_output(it, cfg)),
        degraded,
    }
}
