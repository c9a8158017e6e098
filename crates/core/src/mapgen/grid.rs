//! Tile-space primitives shared by the biome generators.

use crate::rng::Rand;
use crate::types::{Pos, TileKind};

use super::model::MapData;

pub(super) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub(super) const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub(super) fn orthogonal_neighbors(pos: Pos) -> [Pos; 4] {
    ORTHOGONAL_STEPS.map(|(dy, dx)| Pos { y: pos.y + dy, x: pos.x + dx })
}

/// Overwrites the outer ring with `kind`, restoring the border invariant.
pub(super) fn seal_border(map: &mut MapData, kind: TileKind) {
    for x in 0..map.width {
        map.tiles[x] = kind;
        map.tiles[(map.height - 1) * map.width + x] = kind;
    }
    for y in 0..map.height {
        map.tiles[y * map.width] = kind;
        map.tiles[y * map.width + (map.width - 1)] = kind;
    }
}

/// Eight-neighbor wall count; out-of-bounds neighbors read as wall.
pub(super) fn wall_neighbor_count(map: &MapData, pos: Pos) -> usize {
    let mut count = 0;
    for dy in -1..=1_i32 {
        for dx in -1..=1_i32 {
            if dy == 0 && dx == 0 {
                continue;
            }
            if map.tile_at(Pos { y: pos.y + dy, x: pos.x + dx }).is_wall() {
                count += 1;
            }
        }
    }
    count
}

const STAIRS_SAMPLE_BUDGET: usize = 1000;

/// Converts one floor tile to `Stairs`: bounded rejection sampling first,
/// then a row-major scan. A grid with no floor at all gets its center tile
/// carved, upholding the at-least-one-walkable-tile guarantee.
pub(super) fn place_stairs_on_random_floor<R: Rand>(map: &mut MapData, rng: &mut R) -> Pos {
    if map.width > 2 && map.height > 2 {
        for _ in 0..STAIRS_SAMPLE_BUDGET {
            let pos = Pos {
                y: rng.range(1, map.height - 2) as i32,
                x: rng.range(1, map.width - 2) as i32,
            };
            if map.tile_at(pos).is_floor() {
                map.set_tile(pos, TileKind::Stairs);
                return pos;
            }
        }
        for y in 1..(map.height - 1) {
            for x in 1..(map.width - 1) {
                let pos = Pos { y: y as i32, x: x as i32 };
                if map.tile_at(pos).is_floor() {
                    map.set_tile(pos, TileKind::Stairs);
                    return pos;
                }
            }
        }
    }

    log::debug!("no floor tile for stairs; carving the grid center");
    let center = Pos { y: (map.height / 2) as i32, x: (map.width / 2) as i32 };
    map.set_tile(center, TileKind::Stairs);
    center
}
