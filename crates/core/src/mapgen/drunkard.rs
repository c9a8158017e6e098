//! Drunkard's-walk tunnel generator.

use crate::rng::Rand;
use crate::types::{Pos, Theme, TileKind};

use super::grid::{ORTHOGONAL_STEPS, place_stairs_on_random_floor};
use super::model::MapData;

const FLOOR_COVERAGE_TARGET: f64 = 0.40;
/// The walk is only probabilistically bounded; the cap turns a pathological
/// clamped walk into a short map instead of a hang.
const STEP_CAP_PER_TILE: usize = 25;

pub(super) fn generate_drunkard<R: Rand>(
    rng: &mut R,
    width: usize,
    height: usize,
    level: u32,
) -> MapData {
    let mut map = MapData::filled(width, height, TileKind::Wall, level, Theme::Caverns);
    if width <= 2 || height <= 2 {
        place_stairs_on_random_floor(&mut map, rng);
        return map;
    }

    let target_floor_tiles = ((width * height) as f64 * FLOOR_COVERAGE_TARGET) as usize;
    let step_cap = width * height * STEP_CAP_PER_TILE;

    let mut cursor = Pos { y: (height / 2) as i32, x: (width / 2) as i32 };
    let mut carved = 0_usize;
    let mut steps = 0_usize;

    while carved < target_floor_tiles {
        if steps >= step_cap {
            log::debug!(
                "drunkard's walk capped at {steps} steps with {carved}/{target_floor_tiles} tiles"
            );
            break;
        }
        steps += 1;

        if map.tile_at(cursor) != TileKind::Floor {
            map.set_tile(cursor, TileKind::Floor);
            carved += 1;
        }

        let (dy, dx) = *rng.pick(&ORTHOGONAL_STEPS);
        cursor = Pos {
            y: (cursor.y + dy).clamp(1, height as i32 - 2),
            x: (cursor.x + dx).clamp(1, width as i32 - 2),
        };
    }

    place_stairs_on_random_floor(&mut map, rng);
    map
}
