// Spatial hash over grid cells, backing the placement scans.
//
// The safe-position search probes many candidate rectangles (top-left scan,
// ring search, exhaustive scan). Hashing committed items into coarse buckets
// keeps each probe near O(1) instead of O(items).

use std::collections::HashMap;

use super::RectI;
use crate::item::GridItem;

/// How many grid cells one bucket spans. Roughly the width of a large
/// widget, so most probes touch one or two buckets.
const BUCKET_SPAN: i32 = 4;

/// Spatial hash of committed item rectangles, in grid-cell coordinates.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    buckets: HashMap<(i32, i32), Vec<RectI>>,
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self { buckets: HashMap::new() }
    }

    /// Index every item except the one being moved.
    pub fn from_items(items: &[GridItem], skip_id: &str) -> Self {
        let mut grid = Self::new();
        for item in items {
            if item.id != skip_id {
                grid.insert(item.rect());
            }
        }
        grid
    }

    fn bucket_range(rect: &RectI) -> impl Iterator<Item = (i32, i32)> {
        let min_x = rect.x.div_euclid(BUCKET_SPAN);
        let max_x = (rect.right() - 1).div_euclid(BUCKET_SPAN);
        let min_y = rect.y.div_euclid(BUCKET_SPAN);
        let max_y = (rect.bottom() - 1).div_euclid(BUCKET_SPAN);
        (min_x..=max_x).flat_map(move |bx| (min_y..=max_y).map(move |by| (bx, by)))
    }

    pub fn insert(&mut self, rect: RectI) {
        for bucket in Self::bucket_range(&rect) {
            self.buckets.entry(bucket).or_default().push(rect);
        }
    }

    /// Exact half-open overlap test against everything indexed. Bucket hits
    /// are candidates only; each is re-checked precisely.
    pub fn overlaps_any(&self, rect: &RectI) -> bool {
        for bucket in Self::bucket_range(rect) {
            if let Some(rects) = self.buckets.get(&bucket) {
                if rects.iter().any(|r| r.overlaps(rect)) {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps_any() {
        let mut grid = SpatialGrid::new();
        grid.insert(RectI { x: 0, y: 0, w: 4, h: 4 });

        assert!(grid.overlaps_any(&RectI { x: 2, y: 2, w: 4, h: 4 }));
        assert!(!grid.overlaps_any(&RectI { x: 4, y: 0, w: 4, h: 4 }));
        assert!(!grid.overlaps_any(&RectI { x: 10, y: 10, w: 2, h: 2 }));
    }

    #[test]
    fn test_from_items_skips_mover() {
        let a = GridItem::new("a", 0, 0, 4, 4);
        let b = GridItem::new("b", 8, 0, 4, 4);
        let grid = SpatialGrid::from_items(&[a, b], "a");

        assert!(!grid.overlaps_any(&RectI { x: 0, y: 0, w: 4, h: 4 }));
        assert!(grid.overlaps_any(&RectI { x: 8, y: 0, w: 2, h: 2 }));
    }

    #[test]
    fn test_rect_spanning_buckets() {
        let mut grid = SpatialGrid::new();
        grid.insert(RectI { x: 3, y: 3, w: 6, h: 6 });
        assert!(grid.overlaps_any(&RectI { x: 8, y: 8, w: 2, h: 2 }));
        assert!(!grid.overlaps_any(&RectI { x: 0, y: 0, w: 3, h: 3 }));
    }
}
