//! Dashboard controller: owns the store, the derived grid dimensions and
//! the live interaction, and sequences the layout core around mutations.
//!
//! All geometry mutation funnels through here: pointer events feed the
//! interaction translator, releases and widget adds run the repair loop,
//! container resizes run the reflow engine. The embedding layer drives this
//! from its event loop and renders from the accessors; resize bursts should
//! be debounced by [`GridConfig::debounce_delay_ms`] before calling
//! [`DashboardController::container_resized`].

use crate::interact::{
    self, Interaction, ResizeHandle, begin_drag, begin_resize, clamp_commit, drag_position,
    resize_rect, span_pixel_size,
};
use crate::item::{GridItem, WidgetConfig};
use crate::output::{DashboardOutput, dashboard_output};
use crate::layout::{
    GridConfig, GridDimensions, auto_organize, compute_dimensions, find_safe_position,
    is_valid_position, reflow_items, resolve_overlaps,
};
use crate::store::{DashboardSnapshot, DashboardStore, SnapshotError};

#[derive(Debug, Default)]
pub struct DashboardController {
    store: DashboardStore,
    config: GridConfig,
    dims: GridDimensions,
    interaction: Interaction,
    preview: Option<GridItem>,
    add_widget_mode: bool,
    max_height: Option<i32>,
    last_repair_degraded: bool,
}

impl DashboardController {
    pub fn new(initial_items: Vec<GridItem>, edit_mode: bool) -> Self {
        Self {
            store: DashboardStore::new(initial_items, edit_mode),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[GridItem] {
        self.store.items()
    }

    pub fn preview(&self) -> Option<&GridItem> {
        self.preview.as_ref()
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn is_edit_mode(&self) -> bool {
        self.store.is_edit_mode()
    }

    pub fn is_add_widget_mode(&self) -> bool {
        self.add_widget_mode
    }

    pub fn is_fixed_height(&self) -> bool {
        self.max_height.is_some()
    }

    /// True when the most recent repair run exhausted its budget and left
    /// overlaps behind. Consumers may surface this as a degraded-layout
    /// indicator.
    pub fn last_repair_degraded(&self) -> bool {
        self.last_repair_degraded
    }

    pub fn toggle_edit_mode(&mut self) {
        self.store.toggle_edit_mode();
        self.add_widget_mode = false;
        self.cancel_interaction();
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.store.set_edit_mode(enabled);
        if !enabled {
            self.add_widget_mode = false;
            self.cancel_interaction();
        }
    }

    pub fn toggle_add_widget_mode(&mut self) {
        if !self.store.is_edit_mode() {
            return;
        }
        self.add_widget_mode = !self.add_widget_mode;
    }

    /// Cap the container height at one and a half times the minimum, or
    /// release the cap again.
    pub fn toggle_fixed_height(&mut self) {
        self.max_height = match self.max_height {
            None => Some(self.config.min_container_height * 3 / 2),
            Some(_) => None,
        };
        self.dims =
            compute_dimensions(self.dims.width, self.store.items(), &self.config, self.max_height);
    }

    /// Add a widget of the given type, preferring the given cell (grid
    /// origin by default). No-op outside edit mode. Returns the new id.
    pub fn add_widget_at(
        &mut self,
        widget: &WidgetConfig,
        at: Option<(i32, i32)>,
    ) -> Option<String> {
        if !self.store.is_edit_mode() {
            return None;
        }

        let (x, y) = at.unwrap_or((0, 0));
        let mut probe = GridItem::new("temp", x, y, widget.default_w, widget.default_h);
        probe.kind = widget.kind.clone();
        probe.title = widget.title.clone();
        probe.capture_original();

        let placement =
            find_safe_position(&probe, self.store.items(), false, &self.dims, &self.config);

        let id = self.store.allocate_id();
        let mut item = GridItem::new(id.clone(), placement.x, placement.y, placement.w, placement.h);
        item.kind = widget.kind.clone();
        item.title = widget.title.clone();
        item.capture_original();
        item.is_animating = true;

        if !is_valid_position(&item, self.store.items(), &self.dims, &self.config, None) {
            // Even the searched spot collides (crowded grid); park at the
            // origin and let the repair pass sort the board out.
            item.x = 0;
            item.y = 0;
            item.capture_original();
        }

        let mut items = self.store.items().to_vec();
        items.push(item);
        self.run_repair(items, true);
        Some(id)
    }

    pub fn remove_item(&mut self, id: &str) {
        if !self.store.is_edit_mode() {
            return;
        }
        self.store.remove_item(id);
    }

    /// Repack the whole board top-left, largest widgets first. No-op
    /// outside edit mode.
    pub fn auto_organize(&mut self) {
        if !self.store.is_edit_mode() {
            return;
        }
        let organized = auto_organize(self.store.items(), &self.dims, &self.config);
        self.store.set_all(organized);
    }

    /// Recompute dimensions for a new container width, reflowing item
    /// positions when the column count changed (or the board grew several
    /// rows). Returns true when a reflow ran.
    pub fn container_resized(&mut self, container_width: i32) -> bool {
        let old = self.dims;
        self.dims =
            compute_dimensions(container_width, self.store.items(), &self.config, self.max_height);

        let needs_reflow = (self.dims.cols != old.cols || self.dims.rows > old.rows + 2)
            && self.dims.cols > 0
            && !self.store.is_empty();
        if needs_reflow {
            let outcome =
                reflow_items(self.store.items(), old.cols, &self.dims, &self.config);
            self.last_repair_degraded = outcome.degraded;
            self.store.set_all(outcome.items);
        }
        needs_reflow
    }

    /// Pointer-down on an item, in grid-content pixels. Corner hits start a
    /// resize, anywhere else a drag. Ignored outside edit mode or while an
    /// interaction is already live.
    pub fn pointer_down(&mut self, id: &str, pointer_x: i32, pointer_y: i32) {
        if !self.store.is_edit_mode() || !self.interaction.is_idle() || self.preview.is_some() {
            return;
        }
        let Some(item) = self.store.get(id).cloned() else {
            return;
        };

        let local_x = pointer_x - interact::grid_to_pixel(item.x, &self.config);
        let local_y = pointer_y - interact::grid_to_pixel(item.y, &self.config);
        let width = span_pixel_size(item.w, &self.config);
        let height = span_pixel_size(item.h, &self.config);

        self.interaction = match ResizeHandle::hit_test(
            local_x,
            local_y,
            width,
            height,
            self.config.corner_size,
        ) {
            Some(handle) => {
                Interaction::Resizing(begin_resize(&item, pointer_x, pointer_y, handle))
            }
            None => Interaction::Dragging(begin_drag(&item, pointer_x, pointer_y, &self.config)),
        };
        self.preview = Some(item);
    }

    /// Pointer movement while an interaction is live updates only the
    /// preview; the committed list never changes here.
    pub fn pointer_move(&mut self, pointer_x: i32, pointer_y: i32) {
        let Some(preview) = self.preview.as_mut() else {
            return;
        };
        match &self.interaction {
            Interaction::Dragging(state) => {
                let (x, y) =
                    drag_position(state, preview, pointer_x, pointer_y, &self.dims, &self.config);
                preview.x = x;
                preview.y = y;
            }
            Interaction::Resizing(state) => {
                let rect = resize_rect(state, pointer_x, pointer_y, &self.dims, &self.config);
                preview.set_rect(rect);
            }
            Interaction::Idle => {}
        }
    }

    /// Pointer release: commit the preview into the item (which becomes its
    /// new anchor), then repair the board with the moved item sticky.
    pub fn pointer_up(&mut self) {
        if let (Some(id), Some(preview)) =
            (self.interaction.active_id().map(String::from), self.preview.take())
        {
            let rect = clamp_commit(&preview, &self.dims, &self.config);
            self.store.update_item(&id, |item| {
                item.set_rect(rect);
                item.capture_original();
                item.is_animating = true;
            });

            let mut items = self.store.items().to_vec();
            for item in &mut items {
                item.is_animating = false;
            }
            self.run_repair(items, true);
        }
        self.interaction = Interaction::Idle;
        self.preview = None;
    }

    /// Clear every animation hint; the consumer calls this once the
    /// animation window elapses.
    pub fn clear_animation_flags(&mut self) {
        self.store.for_each_mut(|item| item.is_animating = false);
    }

    /// Snapshot of the board ready for rendering: pixel bounds per item,
    /// the live preview and the current dimensions.
    pub fn render(&self) -> DashboardOutput {
        dashboard_output(
            self.store.items(),
            self.preview.as_ref(),
            self.dims,
            &self.config,
            self.last_repair_degraded,
        )
    }

    pub fn save(&self) -> DashboardSnapshot {
        self.store.save()
    }

    pub fn load(&mut self, snapshot: DashboardSnapshot) {
        self.store.load(snapshot);
    }

    pub fn load_str(&mut self, json: &str) -> Result<(), SnapshotError> {
        self.store.load_str(json)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    fn run_repair(&mut self, items: Vec<GridItem>, reanchor_to_original: bool) {
        let outcome = resolve_overlaps(items, reanchor_to_original, &self.dims, &self.config);
        self.last_repair_degraded = outcome.degraded;
        self.store.set_all(outcome.items);
    }

    fn cancel_interaction(&mut self) {
        self.interaction = Interaction::Idle;
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::grid_to_pixel;

    fn widget(kind: &str, w: i32, h: i32) -> WidgetConfig {
        WidgetConfig {
            kind: kind.to_string(),
            title: kind.to_string(),
            default_w: w,
            default_h: h,
        }
    }

    fn controller_with(items: Vec<GridItem>) -> DashboardController {
        DashboardController::new(items, true)
    }

    #[test]
    fn test_add_widget_fills_first_free_cell() {
        // With (0,0,4,4) occupied on 16x12, a new 4x4 widget lands at
        // (4,0).
        let mut ctl = controller_with(vec![GridItem::new("1", 0, 0, 4, 4)]);
        let id = ctl.add_widget_at(&widget("chart", 4, 4), None).unwrap();
        let added = ctl.items().iter().find(|it| it.id == id).unwrap();
        assert_eq!((added.x, added.y), (4, 0));
        assert_eq!(added.original_x, Some(4));
        assert!(added.is_animating);
    }

    #[test]
    fn test_add_widget_ignored_outside_edit_mode() {
        let mut ctl = DashboardController::new(Vec::new(), false);
        assert!(ctl.add_widget_at(&widget("chart", 4, 4), None).is_none());
        assert!(ctl.items().is_empty());
    }

    #[test]
    fn test_remove_ignored_outside_edit_mode() {
        let mut ctl = DashboardController::new(vec![GridItem::new("1", 0, 0, 4, 4)], false);
        ctl.remove_item("1");
        assert_eq!(ctl.items().len(), 1);
        ctl.set_edit_mode(true);
        ctl.remove_item("1");
        assert!(ctl.items().is_empty());
    }

    #[test]
    fn test_drag_commit_repairs_and_reanchors() {
        let mut ctl = controller_with(vec![
            GridItem::new("1", 0, 0, 4, 4),
            GridItem::new("2", 8, 0, 4, 4),
        ]);
        let cfg = ctl.config().clone();

        // Grab item 1 by its center and drop it at (6,0), half over item 2.
        let grab = grid_to_pixel(2, &cfg);
        ctl.pointer_down("1", grab, grab);
        assert!(ctl.preview().is_some());
        ctl.pointer_move(grid_to_pixel(6, &cfg) + grab, grab);
        assert_eq!(ctl.preview().unwrap().x, 6);
        // Committed list untouched during the drag.
        assert_eq!(ctl.items().iter().find(|it| it.id == "1").unwrap().x, 0);

        ctl.pointer_up();
        assert!(ctl.preview().is_none());

        let one = ctl.items().iter().find(|it| it.id == "1").unwrap();
        let two = ctl.items().iter().find(|it| it.id == "2").unwrap();
        // The dragged item is sticky at its drop cell and re-anchored; the
        // displaced one yielded.
        assert_eq!((one.x, one.y), (6, 0));
        assert_eq!(one.original_x, Some(6));
        assert!(!one.rect().overlaps(&two.rect()));
        assert!(two.is_animating, "displaced item carries the animation hint");
    }

    #[test]
    fn test_pointer_down_ignored_while_interaction_live() {
        let mut ctl = controller_with(vec![
            GridItem::new("1", 0, 0, 4, 4),
            GridItem::new("2", 8, 0, 4, 4),
        ]);
        let cfg = ctl.config().clone();
        ctl.pointer_down("1", grid_to_pixel(1, &cfg), grid_to_pixel(1, &cfg));
        let first = ctl.interaction.active_id().map(String::from);
        ctl.pointer_down("2", grid_to_pixel(8, &cfg), grid_to_pixel(0, &cfg));
        assert_eq!(ctl.interaction.active_id().map(String::from), first);
    }

    #[test]
    fn test_corner_grab_resizes() {
        let mut ctl = controller_with(vec![GridItem::new("1", 0, 0, 4, 4)]);
        let cfg = ctl.config().clone();

        // Bottom-right corner of a 4x4 item.
        let corner = span_pixel_size(4, &cfg) - 2;
        ctl.pointer_down("1", corner, corner);
        assert!(matches!(ctl.interaction, Interaction::Resizing(_)));

        // Drag the corner two cells right: width grows, nothing else.
        ctl.pointer_move(corner + 2 * cfg.cell_size(), corner);
        let p = ctl.preview().unwrap();
        assert_eq!((p.x, p.w, p.h), (0, 6, 4));

        ctl.pointer_up();
        let item = ctl.items().iter().find(|it| it.id == "1").unwrap();
        assert_eq!((item.w, item.h), (6, 4));
    }

    #[test]
    fn test_toggle_edit_mode_cancels_interaction() {
        let mut ctl = controller_with(vec![GridItem::new("1", 0, 0, 4, 4)]);
        ctl.pointer_down("1", 5, 5);
        assert!(ctl.preview().is_some());
        ctl.toggle_edit_mode();
        assert!(ctl.preview().is_none());
        assert!(ctl.interaction.is_idle());
        assert!(!ctl.is_edit_mode());
    }

    #[test]
    fn test_container_shrink_reflows() {
        // Dropping from 16 to 8 columns compacts the item at (10,0) into
        // the new range.
        let mut item = GridItem::new("1", 10, 0, 4, 4);
        item.capture_original();
        let mut ctl = controller_with(vec![item]);
        // 8 columns: 8 * 48 - 8 + 32 = 408px container.
        let reflowed = ctl.container_resized(408);
        assert!(reflowed);
        assert_eq!(ctl.dimensions().cols, 8);
        let it = &ctl.items()[0];
        assert!(it.x + it.w <= 8);
    }

    #[test]
    fn test_container_resize_without_column_change_skips_reflow() {
        let mut ctl = controller_with(vec![GridItem::new("1", 0, 0, 4, 4)]);
        assert!(!ctl.container_resized(800));
        assert_eq!(ctl.dimensions().cols, 16);
    }

    #[test]
    fn test_expand_restores_after_shrink() {
        let mut item = GridItem::new("1", 10, 0, 4, 4);
        item.capture_original();
        let mut ctl = controller_with(vec![item]);
        ctl.container_resized(408);
        assert!(ctl.items()[0].x + 4 <= 8);
        ctl.container_resized(800);
        assert_eq!((ctl.items()[0].x, ctl.items()[0].y), (10, 0));
    }

    #[test]
    fn test_clear_animation_flags() {
        let mut ctl = controller_with(vec![GridItem::new("1", 0, 0, 4, 4)]);
        ctl.add_widget_at(&widget("chart", 4, 4), None);
        assert!(ctl.items().iter().any(|it| it.is_animating));
        ctl.clear_animation_flags();
        assert!(ctl.items().iter().all(|it| !it.is_animating));
    }

    #[test]
    fn test_render_carries_preview_during_drag() {
        let mut ctl = controller_with(vec![GridItem::new("1", 0, 0, 4, 4)]);
        assert!(ctl.render().preview.is_none());
        let cfg = ctl.config().clone();
        ctl.pointer_down("1", grid_to_pixel(2, &cfg), grid_to_pixel(2, &cfg));
        let out = ctl.render();
        assert_eq!(out.preview.unwrap().id, "1");
        assert_eq!(out.items.len(), 1);
    }

    #[test]
    fn test_fixed_height_toggle() {
        let mut ctl = controller_with(Vec::new());
        assert!(!ctl.is_fixed_height());
        ctl.toggle_fixed_height();
        assert!(ctl.is_fixed_height());
        assert_eq!(ctl.dimensions().height, 600);
        ctl.toggle_fixed_height();
        assert!(!ctl.is_fixed_height());
    }
}
