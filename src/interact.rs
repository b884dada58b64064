//! Pointer-to-grid interaction translation.
//!
//! Converts pointer positions (pixels, relative to the grid content area)
//! into grid-unit geometry for the item under direct manipulation. While an
//! interaction is live only the preview changes; the committed list is
//! untouched until release. At most one interaction is active at a time:
//! Idle -> Dragging | Resizing -> Idle.

use crate::item::GridItem;
use crate::layout::{GridConfig, GridDimensions, RectI};

/// Which corner of an item was grabbed. Resizing is corner-only; there are
/// no edge-midpoint handles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl ResizeHandle {
    pub fn has_north(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    pub fn has_south(self) -> bool {
        matches!(self, Self::Sw | Self::Se)
    }

    pub fn has_west(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    pub fn has_east(self) -> bool {
        matches!(self, Self::Ne | Self::Se)
    }

    /// Corner hit test: `local_x/y` are pixels from the item's top-left,
    /// `width/height` the item's pixel extent. Pointer positions inside a
    /// corner square grab that corner; anywhere else means drag.
    pub fn hit_test(
        local_x: i32,
        local_y: i32,
        width: i32,
        height: i32,
        corner_size: i32,
    ) -> Option<Self> {
        let west = local_x <= corner_size;
        let east = local_x >= width - corner_size;
        let north = local_y <= corner_size;
        let south = local_y >= height - corner_size;
        match (north, south, west, east) {
            (true, _, true, _) => Some(Self::Nw),
            (true, _, _, true) => Some(Self::Ne),
            (_, true, true, _) => Some(Self::Sw),
            (_, true, _, true) => Some(Self::Se),
            _ => None,
        }
    }
}

/// Live drag: pointer offset from the item's pixel origin plus a copy of
/// the committed geometry.
#[derive(Debug, Clone)]
pub struct DragState {
    pub id: String,
    pub start_x: i32,
    pub start_y: i32,
    pub original: GridItem,
}

/// Live resize: pointer-down position plus the grabbed corner.
#[derive(Debug, Clone)]
pub struct ResizeState {
    pub id: String,
    pub start_x: i32,
    pub start_y: i32,
    pub original: GridItem,
    pub handle: ResizeHandle,
}

#[derive(Debug, Clone, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn active_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging(d) => Some(&d.id),
            Self::Resizing(r) => Some(&r.id),
        }
    }
}

/// Nearest cell index for a pixel offset. Exact half-cells round toward
/// positive infinity, not away from zero, so a delta of `-cell/2` snaps
/// to 0 rather than -1.
pub fn pixel_to_grid(px: i32, cfg: &GridConfig) -> i32 {
    ((px as f64 / cfg.cell_size() as f64) + 0.5).floor() as i32
}

/// Pixel origin of a cell index.
pub fn grid_to_pixel(cell: i32, cfg: &GridConfig) -> i32 {
    cell * cfg.cell_size()
}

/// Pixel extent of a span of cells: content boxes plus interior margins.
pub fn span_pixel_size(cells: i32, cfg: &GridConfig) -> i32 {
    let cells = cells.max(0);
    if cells == 0 { 0 } else { cells * cfg.grid_size + (cells - 1) * cfg.margin }
}

pub fn begin_drag(item: &GridItem, pointer_x: i32, pointer_y: i32, cfg: &GridConfig) -> DragState {
    DragState {
        id: item.id.clone(),
        start_x: pointer_x - grid_to_pixel(item.x, cfg),
        start_y: pointer_y - grid_to_pixel(item.y, cfg),
        original: item.clone(),
    }
}

pub fn begin_resize(
    item: &GridItem,
    pointer_x: i32,
    pointer_y: i32,
    handle: ResizeHandle,
) -> ResizeState {
    ResizeState {
        id: item.id.clone(),
        start_x: pointer_x,
        start_y: pointer_y,
        original: item.clone(),
        handle,
    }
}

/// New preview origin for a drag, clamped so the item stays on the grid.
pub fn drag_position(
    state: &DragState,
    preview: &GridItem,
    pointer_x: i32,
    pointer_y: i32,
    dims: &GridDimensions,
    cfg: &GridConfig,
) -> (i32, i32) {
    let item_px = pointer_x - state.start_x;
    let item_py = pointer_y - state.start_y;
    let x = pixel_to_grid(item_px, cfg).clamp(0, (dims.cols - preview.w).max(0));
    let y = pixel_to_grid(item_py, cfg).clamp(0, (dims.rows - preview.h).max(0));
    (x, y)
}

/// New preview geometry for a resize. The grabbed edges follow the pointer
/// delta in whole cells; opposing edges stay anchored, which re-derives the
/// origin when a north or west edge moves. Size is clamped to the allowed
/// range and to the remaining grid space.
pub fn resize_rect(
    state: &ResizeState,
    pointer_x: i32,
    pointer_y: i32,
    dims: &GridDimensions,
    cfg: &GridConfig,
) -> RectI {
    let orig = &state.original;
    let mut x = orig.x;
    let mut y = orig.y;
    let mut w = orig.w;
    let mut h = orig.h;

    let dx = pixel_to_grid(pointer_x - state.start_x, cfg);
    let dy = pixel_to_grid(pointer_y - state.start_y, cfg);

    if state.handle.has_east() {
        w = (orig.w + dx).clamp(cfg.min_size, cfg.max_size);
    }
    if state.handle.has_west() {
        let new_w = (orig.w - dx).clamp(cfg.min_size, cfg.max_size);
        x = orig.x + (orig.w - new_w);
        w = new_w;
    }
    if state.handle.has_south() {
        h = (orig.h + dy).clamp(cfg.min_size, cfg.max_size);
    }
    if state.handle.has_north() {
        let new_h = (orig.h - dy).clamp(cfg.min_size, cfg.max_size);
        y = orig.y + (orig.h - new_h);
        h = new_h;
    }

    x = x.max(0);
    y = y.max(0);
    w = w.min(dims.cols - x).max(cfg.min_size);
    h = h.min(dims.rows - y).max(cfg.min_size);

    RectI { x, y, w, h }
}

/// Final clamp applied to the preview at release, before it is committed.
pub fn clamp_commit(preview: &GridItem, dims: &GridDimensions, cfg: &GridConfig) -> RectI {
    let x = preview.x.clamp(0, (dims.cols - cfg.min_size).max(0));
    let y = preview.y.clamp(0, (dims.rows - cfg.min_size).max(0));
    let w = preview.w.clamp(cfg.min_size, (dims.cols - x).max(cfg.min_size));
    let h = preview.h.clamp(cfg.min_size, (dims.rows - y).max(cfg.min_size));
    RectI { x, y, w, h }
}
