// Auto-organize: repack the whole board top-left.
//
// Largest items are placed first (area from the stored anchor when present,
// ties broken by id) with a row-major first-fit scan, so the result is a
// dense arrangement regardless of how scattered things were. Each found
// position becomes the item's new anchor.

use super::placement::find_safe_position;
use super::{GridConfig, GridDimensions, RectI};
use crate::item::GridItem;

/// Repack all items against an empty board. Returns the new arrangement;
/// every item is marked animating and re-anchored at its packed position.
pub fn auto_organize(
    items: &[GridItem],
    dims: &GridDimensions,
    cfg: &GridConfig,
) -> Vec<GridItem> {
    let mut sorted: Vec<GridItem> = items.to_vec();
    sorted.sort_by(|a, b| {
        let area =
            |it: &GridItem| it.original_w.unwrap_or(it.w) * it.original_h.unwrap_or(it.h);
        area(b).cmp(&area(a)).then(a.numeric_id().cmp(&b.numeric_id()))
    });

    let mut organized: Vec<GridItem> = Vec::new();

    for item in sorted {
        let mut placed = item.clone();
        placed.w = item.original_w.unwrap_or(item.w).min(dims.cols).max(cfg.min_size);
        placed.h = item.original_h.unwrap_or(item.h).max(cfg.min_size);
        placed.is_animating = true;

        match first_fit(&placed, &organized, dims) {
            Some((x, y)) => {
                placed.x = x;
                placed.y = y;
            }
            None => {
                let fallback = find_safe_position(&placed, &organized, false, dims, cfg);
                fallback.apply_to(&mut placed);
            }
        }
        placed.capture_original();
        organized.push(placed);
    }

    organized
}

/// Topmost-then-leftmost free cell that fits the item against what has been
/// packed so far.
fn first_fit(item: &GridItem, packed: &[GridItem], dims: &GridDimensions) -> Option<(i32, i32)> {
    for y in 0..=dims.rows - item.h {
        for x in 0..=dims.cols - item.w {
            let rect = RectI { x, y, w: item.w, h: item.h };
            if !packed.iter().any(|p| rect.overlaps(&p.rect())) {
                return Some((x, y));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(cols: i32, rows: i32) -> GridDimensions {
        GridDimensions { width: 800, height: 600, cols, rows }
    }

    #[test]
    fn test_packs_largest_first_top_left() {
        let cfg = GridConfig::default();
        let d = dims(16, 12);
        let small = GridItem::new("1", 9, 7, 2, 2);
        let big = GridItem::new("2", 5, 5, 6, 4);
        let out = auto_organize(&[small, big], &d, &cfg);

        let big = out.iter().find(|it| it.id == "2").unwrap();
        assert_eq!((big.x, big.y), (0, 0), "largest item takes the corner");
        let small = out.iter().find(|it| it.id == "1").unwrap();
        assert_eq!((small.x, small.y), (6, 0), "next item packs beside it");
    }

    #[test]
    fn test_result_has_no_overlaps_and_fresh_anchors() {
        let cfg = GridConfig::default();
        let d = dims(16, 12);
        let items: Vec<GridItem> = (0..4)
            .map(|i| GridItem::new(i.to_string(), 3, 3, 4, 4))
            .collect();
        let out = auto_organize(&items, &d, &cfg);

        for i in 0..out.len() {
            assert_eq!(out[i].original_x, Some(out[i].x));
            assert_eq!(out[i].original_y, Some(out[i].y));
            for j in i + 1..out.len() {
                assert!(!out[i].rect().overlaps(&out[j].rect()));
            }
        }
    }

    #[test]
    fn test_area_tie_breaks_by_id() {
        let cfg = GridConfig::default();
        let d = dims(16, 12);
        let a = GridItem::new("7", 8, 8, 4, 4);
        let b = GridItem::new("3", 2, 2, 4, 4);
        let out = auto_organize(&[a, b], &d, &cfg);
        let first = out.iter().find(|it| it.id == "3").unwrap();
        assert_eq!((first.x, first.y), (0, 0));
    }
}
