// Anchored safe-position search.
//
// Finds the nearest valid placement for one item while all others stay
// fixed. The search order is deterministic and biased toward minimal visual
// disruption: the anchor itself, then (for fresh items) a top-left row scan
// that fills gaps near existing content, then rings of increasing Chebyshev
// distance around the anchor, then a full row-major sweep. When nothing
// valid exists anywhere, the item is parked at the origin with a clamped
// size and the caller's repair loop is expected to relocate whatever it now
// collides with.

use super::spatial_grid::SpatialGrid;
use super::{GridConfig, GridDimensions, RectI, is_valid_position};
use crate::item::GridItem;

/// Geometry chosen by [`find_safe_position`]. Applying it also raises the
/// animation hint, since the item may have just moved.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Placement {
    pub fn rect(&self) -> RectI {
        RectI { x: self.x, y: self.y, w: self.w, h: self.h }
    }

    pub fn apply_to(&self, item: &mut GridItem) {
        item.x = self.x;
        item.y = self.y;
        item.w = self.w;
        item.h = self.h;
        item.is_animating = true;
    }
}

/// Find a non-overlapping placement for `item` given fixed `existing` items.
///
/// The anchor is the item's `original_*` geometry when present and
/// `prefer_current` is false (repositioning after a reflow), otherwise its
/// current geometry. Width is clamped so the item always fits the column
/// count.
pub fn find_safe_position(
    item: &GridItem,
    existing: &[GridItem],
    prefer_current: bool,
    dims: &GridDimensions,
    cfg: &GridConfig,
) -> Placement {
    let mut w = item.w.min(dims.cols);
    let mut h = item.h;
    let mut start_x = item.x;
    let mut start_y = item.y;

    if !prefer_current && item.has_original() {
        start_x = item.original_x.unwrap_or(start_x);
        start_y = item.original_y.unwrap_or(start_y);
        if let Some(ow) = item.original_w {
            w = ow.min(dims.cols);
        }
        if let Some(oh) = item.original_h {
            h = oh;
        }
    }

    start_x = start_x.min(dims.cols - w);

    // Common case: nothing moved, the anchor itself is free.
    let mut probe = item.clone();
    probe.x = start_x;
    probe.y = start_y;
    probe.w = w;
    probe.h = h;
    if is_valid_position(&probe, existing, dims, cfg, None) {
        return Placement { x: start_x, y: start_y, w, h };
    }

    // An undersized item can never pass validity; skip straight to the
    // clamped fallback the way every scan would end up anyway.
    if w >= cfg.min_size && h >= cfg.min_size {
        let occupied = SpatialGrid::from_items(existing, &item.id);

        // Fresh items anchor at the origin; scan rows left to right so new
        // widgets fill gaps near existing content instead of spiralling.
        if start_x == 0 && start_y == 0 && !existing.is_empty() {
            let max_y = existing.iter().map(GridItem::bottom).max().unwrap_or(0);
            for y in 0..=max_y.max(dims.rows - h) {
                if y + h > dims.rows {
                    break;
                }
                for x in 0..=dims.cols - w {
                    let rect = RectI { x, y, w, h };
                    if !occupied.overlaps_any(&rect) {
                        return Placement { x, y, w, h };
                    }
                }
            }
        }

        // Ring search outward from the anchor: for each Chebyshev distance
        // only the ring perimeter is probed, so the first hit is the
        // closest free slot to where the item was.
        let max_distance = dims.cols.max(dims.rows);
        for distance in 1..=max_distance {
            for dy in -distance..=distance {
                for dx in -distance..=distance {
                    if dx.abs() != distance && dy.abs() != distance {
                        continue;
                    }
                    let x = start_x + dx;
                    let y = start_y + dy;
                    if x < 0 || x + w > dims.cols || y < 0 || y + h > dims.rows {
                        continue;
                    }
                    let rect = RectI { x, y, w, h };
                    if !occupied.overlaps_any(&rect) {
                        return Placement { x, y, w, h };
                    }
                }
            }
        }

        // Exhaustive row-major sweep of the whole grid.
        for y in 0..=dims.rows - h {
            for x in 0..=dims.cols - w {
                let rect = RectI { x, y, w, h };
                if !occupied.overlaps_any(&rect) {
                    return Placement { x, y, w, h };
                }
            }
        }
    }

    // Nowhere valid: park at the origin with a clamped size, possibly still
    // overlapping. The repair loop relocates the collider.
    Placement { x: 0, y: 0, w: w.min(dims.cols), h: h.min(dims.rows) }
}
