// Overlap-repair convergence loop.
//
// Resolves pairwise overlaps across the whole item set. Each pass sorts by
// (y, x) so top-left items act as anchors; when a pair overlaps, the item
// later in that order yields and is repositioned through the safe-position
// search. The loop runs until a pass finds no overlap or the attempt budget
// is spent. Convergence is not guaranteed for grids too small for their
// items; the budget bounds worst-case work and the loop then returns a
// best-effort layout flagged as degraded instead of spinning.

use super::placement::find_safe_position;
use super::{GridConfig, GridDimensions};
use crate::item::GridItem;

/// Result of a repair run. `degraded` is true only when the attempt budget
/// ran out with overlaps still present.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub items: Vec<GridItem>,
    pub degraded: bool,
}

/// Attempt budget: generous for small sets, linear in the item count.
fn max_attempts(len: usize) -> usize {
    20.max(len * 2)
}

/// Repair all pairwise overlaps in `items`.
///
/// With `reanchor_to_original` set (commits and reflows), displaced items
/// search from their `original_*` anchor; otherwise they search from where
/// they currently are.
pub fn resolve_overlaps(
    items: Vec<GridItem>,
    reanchor_to_original: bool,
    dims: &GridDimensions,
    cfg: &GridConfig,
) -> RepairOutcome {
    let mut result = items;
    let budget = max_attempts(result.len());
    let mut attempts = 0;
    let mut has_overlaps = true;

    while has_overlaps && attempts < budget {
        has_overlaps = false;
        attempts += 1;

        result.sort_by_key(|it| (it.y, it.x));

        for i in 0..result.len() {
            for j in i + 1..result.len() {
                if !result[i].rect().overlaps(&result[j].rect()) {
                    continue;
                }
                has_overlaps = true;

                // The item lower or further right yields; on a tie the
                // earlier-sorted one moves, so exactly one of two stacked
                // items keeps its cell.
                let mover = if result[j].y > result[i].y
                    || (result[j].y == result[i].y && result[j].x > result[i].x)
                {
                    j
                } else {
                    i
                };

                let fixed: Vec<GridItem> = result
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != mover)
                    .map(|(_, it)| it.clone())
                    .collect();

                let placement = find_safe_position(
                    &result[mover],
                    &fixed,
                    !reanchor_to_original,
                    dims,
                    cfg,
                );
                placement.apply_to(&mut result[mover]);
            }
        }
    }

    let degraded = has_remaining_overlap(&result);
    if degraded {
        tracing::warn!(
            items = result.len(),
            attempts,
            "overlap repair budget exhausted; returning degraded layout"
        );
    }

    RepairOutcome { items: result, degraded }
}

fn has_remaining_overlap(items: &[GridItem]) -> bool {
    for i in 0..items.len() {
        for j in i + 1..items.len() {
            if items[i].rect().overlaps(&items[j].rect()) {
                return true;
            }
        }
    }
    false
}
