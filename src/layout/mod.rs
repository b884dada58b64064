// Grid layout core.
//
// Goals:
// - Deterministic: no randomness, no time budgets beyond the repair loop's
//   attempt counter
// - Integer cell coordinates, half-open rectangles (touching edges do not
//   overlap)
// - No overlap among committed items; a live preview is exempt
// - Every operation resolves edge cases by policy instead of failing
//
// Submodules:
// - spatial_grid: cheap overlap queries for the placement scans
// - placement: anchored safe-position search
// - repair: overlap-repair convergence loop
// - reflow: container-resize handling (expand restores, shrink compacts)
// - organize: top-left repacking

use serde::{Deserialize, Serialize};

use crate::item::GridItem;

mod organize;
mod placement;
mod reflow;
mod repair;
mod spatial_grid;

pub use organize::auto_organize;
pub use placement::{Placement, find_safe_position};
pub use reflow::{compute_dimensions, reflow_items};
pub use repair::{RepairOutcome, resolve_overlaps};
pub use spatial_grid::SpatialGrid;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectI {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl RectI {
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Half-open intersection test: rectangles that merely share an edge
    /// do not overlap.
    pub fn overlaps(&self, other: &RectI) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Fixed layout constants. These are not runtime-negotiable for a given
/// dashboard; `Default` carries the stock values.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Widget cell pixel size (content box, without margin).
    pub grid_size: i32,
    /// Pixel gap between cells.
    pub margin: i32,
    /// Minimum item width/height in cells. Also the floor for column count.
    pub min_size: i32,
    /// Maximum item width/height in cells.
    pub max_size: i32,
    /// Pixel padding inside the container, around the grid content area.
    pub container_padding: i32,
    /// Floor for the container pixel height.
    pub min_container_height: i32,
    /// Pixel size of the corner squares that grab a resize handle.
    pub corner_size: i32,
    /// Animation window in milliseconds; consumers clear `is_animating`
    /// after this long.
    pub animation_duration_ms: u64,
    /// Quiet period for coalescing container-resize bursts.
    pub debounce_delay_ms: u64,
}

impl GridConfig {
    /// Pixel stride from one cell origin to the next.
    pub fn cell_size(&self) -> i32 {
        self.grid_size + self.margin
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 40,
            margin: 8,
            min_size: 2,
            max_size: 12,
            container_padding: 16,
            min_container_height: 400,
            corner_size: 20,
            animation_duration_ms: 300,
            debounce_delay_ms: 150,
        }
    }
}

/// Derived grid extent: pixel size of the container plus the cell counts it
/// yields. Recomputed whenever the container's pixel size changes, never
/// authored directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    pub width: i32,
    pub height: i32,
    pub cols: i32,
    pub rows: i32,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self { width: 800, height: 600, cols: 16, rows: 12 }
    }
}

/// Whether `item` may be committed: at least the minimum size, inside the
/// grid, and overlapping no other item (itself and `exclude` are skipped).
/// Pure, no side effects.
pub fn is_valid_position(
    item: &GridItem,
    others: &[GridItem],
    dims: &GridDimensions,
    cfg: &GridConfig,
    exclude: Option<&str>,
) -> bool {
    if item.w < cfg.min_size || item.h < cfg.min_size {
        return false;
    }
    if item.x < 0 || item.y < 0 || item.x + item.w > dims.cols || item.y + item.h > dims.rows {
        return false;
    }
    let rect = item.rect();
    !others.iter().any(|other| {
        if other.id == item.id || exclude.is_some_and(|ex| other.id == ex) {
            return false;
        }
        rect.overlaps(&other.rect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(cols: i32, rows: i32) -> GridDimensions {
        GridDimensions { width: 800, height: 600, cols, rows }
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = RectI { x: 0, y: 0, w: 4, h: 4 };
        let b = RectI { x: 4, y: 0, w: 4, h: 4 };
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_partial_overlap_detected() {
        let a = RectI { x: 0, y: 0, w: 4, h: 4 };
        let b = RectI { x: 3, y: 3, w: 4, h: 4 };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = RectI { x: 0, y: 0, w: 8, h: 8 };
        let inner = RectI { x: 2, y: 2, w: 2, h: 2 };
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn test_valid_position_bounds() {
        let cfg = GridConfig::default();
        let d = dims(16, 12);
        let item = GridItem::new("1", 14, 0, 4, 4);
        assert!(!is_valid_position(&item, &[], &d, &cfg, None));
        let item = GridItem::new("1", 12, 8, 4, 4);
        assert!(is_valid_position(&item, &[], &d, &cfg, None));
    }

    #[test]
    fn test_valid_position_min_size() {
        let cfg = GridConfig::default();
        let d = dims(16, 12);
        let item = GridItem::new("1", 0, 0, 1, 4);
        assert!(!is_valid_position(&item, &[], &d, &cfg, None));
    }

    #[test]
    fn test_valid_position_skips_self_and_excluded() {
        let cfg = GridConfig::default();
        let d = dims(16, 12);
        let item = GridItem::new("1", 0, 0, 4, 4);
        let same = GridItem::new("1", 0, 0, 4, 4);
        let blocker = GridItem::new("2", 2, 2, 4, 4);
        assert!(is_valid_position(&item, &[same], &d, &cfg, None));
        assert!(!is_valid_position(&item, &[blocker.clone()], &d, &cfg, None));
        assert!(is_valid_position(&item, &[blocker], &d, &cfg, Some("2")));
    }
}
