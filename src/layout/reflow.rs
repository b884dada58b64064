// Grid reflow on container resize.
//
// The column count is derived from the container's pixel width, the row
// count from the items' vertical extent plus a buffer, floored so the grid
// never drops below the minimum visible height. When the column count
// changes, every item's position is re-derived. The two directions follow
// different policies: expansion restores items to where the user originally
// put them (space came back), shrinking compacts aggressively because space
// is now scarce.

use super::placement::find_safe_position;
use super::repair::{RepairOutcome, resolve_overlaps};
use super::{GridConfig, GridDimensions, is_valid_position};
use crate::item::GridItem;

/// Rows added below the lowest item so there is room to drag into.
const ROW_BUFFER: i32 = 4;

/// Derive grid dimensions from the container's pixel width.
///
/// `max_height` caps the container height when the fixed-height toggle is
/// active; otherwise the height grows with the required rows.
pub fn compute_dimensions(
    container_width: i32,
    items: &[GridItem],
    cfg: &GridConfig,
    max_height: Option<i32>,
) -> GridDimensions {
    let cell = cfg.cell_size();
    let available_width = container_width - cfg.container_padding * 2;
    let cols = cfg.min_size.max((available_width + cfg.margin) / cell);

    let max_y = if items.is_empty() {
        cfg.min_size
    } else {
        items.iter().map(GridItem::bottom).max().unwrap_or(0)
    };

    let min_height_span = cfg.min_container_height - cfg.container_padding * 2 + cfg.margin;
    let min_rows = (min_height_span + cell - 1) / cell;
    let rows = min_rows.max(max_y + ROW_BUFFER);

    let height = max_height.unwrap_or_else(|| {
        cfg.min_container_height
            .max(rows * cell - cfg.margin + cfg.container_padding * 2)
    });

    GridDimensions { width: container_width, height, cols, rows }
}

/// Re-derive every item's position for a changed column count.
///
/// Items are processed anchored ones first, in original (y, x) order, with
/// anchor-less items deferred to the end sorted by id, so restoration
/// conflicts resolve the same way every time.
pub fn reflow_items(
    items: &[GridItem],
    old_cols: i32,
    dims: &GridDimensions,
    cfg: &GridConfig,
) -> RepairOutcome {
    let mut sorted: Vec<GridItem> = items.to_vec();
    sorted.sort_by(|a, b| match (a.has_original(), b.has_original()) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        (true, true) => {
            let ka = (a.original_y.unwrap_or(0), a.original_x.unwrap_or(0));
            let kb = (b.original_y.unwrap_or(0), b.original_x.unwrap_or(0));
            ka.cmp(&kb)
        }
        (false, false) => a.numeric_id().cmp(&b.numeric_id()),
    });

    // Every item first takes its preferred size, clamped to the new grid.
    for item in &mut sorted {
        let target_w = item.original_w.unwrap_or(item.w).min(dims.cols);
        let target_h = item.original_h.unwrap_or(item.h);
        item.w = target_w.max(cfg.min_size);
        item.h = target_h.max(cfg.min_size);
        item.is_animating = true;
    }

    if dims.cols > old_cols {
        expand(sorted, dims, cfg)
    } else {
        shrink(sorted, old_cols, dims, cfg)
    }
}

/// Expansion: put items back where the user originally placed them, when
/// that spot is still valid against everything restored so far.
fn expand(items: Vec<GridItem>, dims: &GridDimensions, cfg: &GridConfig) -> RepairOutcome {
    let mut restored: Vec<GridItem> = Vec::new();
    let mut needs_repositioning: Vec<GridItem> = Vec::new();

    for item in items {
        if let (Some(ox), Some(oy)) = (item.original_x, item.original_y) {
            let mut candidate = item.clone();
            candidate.x = ox;
            candidate.y = oy;
            if candidate.x + candidate.w <= dims.cols
                && candidate.y + candidate.h <= dims.rows
                && is_valid_position(&candidate, &restored, dims, cfg, None)
            {
                restored.push(candidate);
                continue;
            }
        }
        needs_repositioning.push(item);
    }

    for item in needs_repositioning {
        let placement = find_safe_position(&item, &restored, false, dims, cfg);
        let mut placed = item;
        placement.apply_to(&mut placed);
        restored.push(placed);
    }

    resolve_overlaps(restored, true, dims, cfg)
}

/// Shrink (or unchanged width): clamp into the new column range and re-place
/// each item against the accumulating set.
fn shrink(
    items: Vec<GridItem>,
    old_cols: i32,
    dims: &GridDimensions,
    cfg: &GridConfig,
) -> RepairOutcome {
    let mut processed: Vec<GridItem> = Vec::new();

    for item in items {
        let mut probe = item;
        if dims.cols < old_cols {
            probe.x = probe.x.min(0.max(dims.cols - probe.w));
        }
        let placement = find_safe_position(&probe, &processed, true, dims, cfg);
        placement.apply_to(&mut probe);
        processed.push(probe);
    }

    resolve_overlaps(processed, true, dims, cfg)
}
