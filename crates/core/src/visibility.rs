//! Field-of-view via recursive shadowcasting over eight octants.
//! Pure function of (grid, origin, radius): no randomness, no carried state.

use std::collections::BTreeSet;

use crate::mapgen::MapData;
use crate::types::Pos;

/// Tiles visible this turn; recomputed from scratch every call.
pub type VisibleSet = BTreeSet<Pos>;
/// Monotonically growing fog-of-war memory owned by the caller.
pub type ExploredSet = BTreeSet<Pos>;

/// 2x2 transforms mapping the canonical octant scan onto the other seven.
const OCTANT_TRANSFORMS: [[i32; 4]; 8] = [
    [1, 0, 0, 1],
    [0, 1, 1, 0],
    [0, -1, 1, 0],
    [-1, 0, 0, 1],
    [-1, 0, 0, -1],
    [0, -1, -1, 0],
    [0, 1, -1, 0],
    [1, 0, 0, -1],
];

pub fn compute_visible(map: &MapData, origin: Pos, radius: i32) -> VisibleSet {
    let mut visible = VisibleSet::new();
    if map.in_bounds(origin) {
        visible.insert(origin);
    }
    for transform in OCTANT_TRANSFORMS {
        scan_octant(map, origin, radius, 1, 1.0, 0.0, transform, &mut visible);
    }
    visible
}

pub fn extend_explored(explored: &mut ExploredSet, visible: &VisibleSet) {
    explored.extend(visible.iter().copied());
}

/// Scans rows of increasing distance inside the `[start, end]` slope window,
/// recursing into a narrowed window whenever an opaque run begins. Recursion
/// depth is bounded by the radius.
#[expect(clippy::too_many_arguments)]
fn scan_octant(
    map: &MapData,
    origin: Pos,
    radius: i32,
    first_row: i32,
    mut start: f64,
    end: f64,
    transform: [i32; 4],
    visible: &mut VisibleSet,
) {
    if start < end {
        return;
    }
    let radius_squared = radius * radius;
    let [xx, xy, yx, yy] = transform;

    for row in first_row..=radius {
        let dy = -row;
        let mut blocked = false;
        let mut resume_slope = start;

        for dx in -row..=0 {
            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);
            if right_slope > start {
                continue;
            }
            if left_slope < end {
                break;
            }

            let target =
                Pos { y: origin.y + dx * yx + dy * yy, x: origin.x + dx * xx + dy * xy };
            if dx * dx + dy * dy < radius_squared && map.in_bounds(target) {
                visible.insert(target);
            }

            if blocked {
                if map.tile_at(target).is_opaque() {
                    resume_slope = right_slope;
                } else {
                    blocked = false;
                    start = resume_slope;
                }
            } else if map.tile_at(target).is_opaque() && row < radius {
                blocked = true;
                scan_octant(map, origin, radius, row + 1, start, left_slope, transform, visible);
                resume_slope = right_slope;
            }
        }

        if blocked {
            break;
        }
    }
}
