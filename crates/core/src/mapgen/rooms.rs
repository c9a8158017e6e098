//! Structured dungeon generator: rejection-placed rooms joined by L-shaped
//! corridors, with a door pass and corridor torches.

use crate::rng::Rand;
use crate::types::{Pos, Theme, TileKind};

use super::grid::orthogonal_neighbors;
use super::model::{MapData, Prop, PropKind, Room};

const ROOM_AREA_DIVISOR: usize = 150;
const ROOM_MIN_EDGE: usize = 6;
const ROOM_MAX_EDGE: usize = 15;
const DOOR_PROBABILITY: f64 = 0.30;
const CORRIDOR_TORCH_PROBABILITY: f64 = 0.15;

pub(super) fn generate_rooms<R: Rand>(
    rng: &mut R,
    width: usize,
    height: usize,
    level: u32,
) -> MapData {
    let mut map = MapData::filled(width, height, TileKind::Wall, level, Theme::Dungeon);

    let room_budget = (width * height) / ROOM_AREA_DIVISOR;
    for _ in 0..room_budget {
        let w = rng.range(ROOM_MIN_EDGE, ROOM_MAX_EDGE);
        let h = rng.range(ROOM_MIN_EDGE, ROOM_MAX_EDGE);
        if w + 2 > width || h + 2 > height {
            continue;
        }
        let candidate = Room {
            x: rng.range(1, width - 1 - w),
            y: rng.range(1, height - 1 - h),
            w,
            h,
        };
        if map.rooms.iter().any(|existing| existing.intersects(&candidate)) {
            continue;
        }

        carve_room(&mut map, candidate);
        if let Some(previous) = map.rooms.last().copied() {
            carve_l_shaped_corridor(&mut map, rng, previous.center(), candidate.center());
        }
        map.rooms.push(candidate);
    }

    carve_doors(&mut map, rng);

    if let Some(last) = map.rooms.last().copied() {
        map.set_tile(last.center(), TileKind::Stairs);
    }

    map
}

fn carve_room(map: &mut MapData, room: Room) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            map.tiles[y * map.width + x] = TileKind::Floor;
        }
    }
}

fn carve_l_shaped_corridor<R: Rand>(map: &mut MapData, rng: &mut R, start: Pos, end: Pos) {
    if rng.coin_flip() {
        carve_horizontal_run(map, rng, start.y, start.x, end.x);
        carve_vertical_run(map, rng, end.x, start.y, end.y);
    } else {
        carve_vertical_run(map, rng, start.x, start.y, end.y);
        carve_horizontal_run(map, rng, end.y, start.x, end.x);
    }
}

fn carve_horizontal_run<R: Rand>(map: &mut MapData, rng: &mut R, y: i32, from_x: i32, to_x: i32) {
    for x in from_x.min(to_x)..=from_x.max(to_x) {
        carve_corridor_tile(map, rng, Pos { y, x });
    }
}

fn carve_vertical_run<R: Rand>(map: &mut MapData, rng: &mut R, x: i32, from_y: i32, to_y: i32) {
    for y in from_y.min(to_y)..=from_y.max(to_y) {
        carve_corridor_tile(map, rng, Pos { y, x });
    }
}

fn carve_corridor_tile<R: Rand>(map: &mut MapData, rng: &mut R, pos: Pos) {
    if pos.x <= 0
        || pos.y <= 0
        || (pos.x as usize) >= map.width - 1
        || (pos.y as usize) >= map.height - 1
    {
        return;
    }
    map.set_tile(pos, TileKind::Floor);
    if rng.chance(CORRIDOR_TORCH_PROBABILITY) {
        attach_torch_to_adjacent_wall(map, pos);
    }
}

fn attach_torch_to_adjacent_wall(map: &mut MapData, pos: Pos) {
    for neighbor in orthogonal_neighbors(pos) {
        if map.in_bounds(neighbor) && map.tile_at(neighbor).is_wall() && !map.prop_at(neighbor) {
            map.props.push(Prop::new(neighbor, PropKind::Torch));
            return;
        }
    }
}

/// Flips boundary floor tiles immediately outside each room footprint to
/// closed doors with independent probability.
fn carve_doors<R: Rand>(map: &mut MapData, rng: &mut R) {
    let rooms = map.rooms.clone();
    for room in rooms {
        let mut edge_tiles = Vec::new();
        for x in room.x..=room.right() {
            edge_tiles.push(Pos { y: room.y as i32 - 1, x: x as i32 });
            edge_tiles.push(Pos { y: room.bottom() as i32 + 1, x: x as i32 });
        }
        for y in room.y..=room.bottom() {
            edge_tiles.push(Pos { y: y as i32, x: room.x as i32 - 1 });
            edge_tiles.push(Pos { y: y as i32, x: room.right() as i32 + 1 });
        }

        for pos in edge_tiles {
            if map.tile_at(pos) == TileKind::Floor && rng.chance(DOOR_PROBABILITY) {
                map.set_tile(pos, TileKind::DoorClosed);
            }
        }
    }
}
