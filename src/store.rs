//! Ordered item store and snapshot serialization.
//!
//! The store is the single source of truth for the item list and the
//! edit-mode flag. It holds no collision logic; the controller sequences
//! the repair loop and reflow around these mutations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::GridItem;

/// Serializable snapshot of the board: geometry and metadata only, no
/// function-valued fields. Round-trip load restores exact geometry and does
/// not re-run validation or repair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub items: Vec<GridItem>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    items: Vec<GridItem>,
    edit_mode: bool,
    next_id: i64,
}

impl DashboardStore {
    pub fn new(initial_items: Vec<GridItem>, edit_mode: bool) -> Self {
        let next_id = next_id_for(&initial_items);
        Self { items: initial_items, edit_mode, next_id }
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GridItem> {
        self.items.iter().find(|it| it.id == id)
    }

    /// Hand out the next id. Ids are never reused while items with an
    /// overlapping lifetime exist.
    pub fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    pub fn add_item(&mut self, item: GridItem) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|it| it.id != id);
    }

    pub fn update_item(&mut self, id: &str, update: impl FnOnce(&mut GridItem)) -> bool {
        match self.items.iter_mut().find(|it| it.id == id) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }

    pub fn set_all(&mut self, items: Vec<GridItem>) {
        self.items = items;
        self.next_id = self.next_id.max(next_id_for(&self.items));
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut GridItem)) {
        for item in &mut self.items {
            f(item);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn save(&self) -> DashboardSnapshot {
        DashboardSnapshot { items: self.items.clone() }
    }

    pub fn load(&mut self, snapshot: DashboardSnapshot) {
        self.set_all(snapshot.items);
    }

    /// Parse and load a JSON snapshot. A malformed snapshot leaves the
    /// current state untouched.
    pub fn load_str(&mut self, json: &str) -> Result<(), SnapshotError> {
        let snapshot: DashboardSnapshot = serde_json::from_str(json)?;
        self.load(snapshot);
        Ok(())
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
    }

    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = !self.edit_mode;
    }
}

/// One past the highest numeric id in use; non-numeric ids count as 0.
fn next_id_for(items: &[GridItem]) -> i64 {
    items.iter().map(GridItem::numeric_id).max().unwrap_or(0) + 1
}
