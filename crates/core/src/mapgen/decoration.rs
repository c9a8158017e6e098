//! Decoration pass over a generated map: room furnishing, ambient clutter,
//! wall ornaments, and cosmetic tile rerolls. Runs before spawn validation
//! and never alters passability or opacity.

use crate::rng::Rand;
use crate::types::{Pos, TileKind};

use super::grid::orthogonal_neighbors;
use super::model::{MapData, Prop, PropKind, Room};

const DINING_BAND: f64 = 0.30;
const STORAGE_BAND: f64 = 0.50;
const LIBRARY_BAND: f64 = 0.70;
const BEDROOM_BAND: f64 = 0.85;

const CHAIR_PROBABILITY: f64 = 0.50;
const STORAGE_TILE_PROBABILITY: f64 = 0.40;
const BOOKSHELF_PROBABILITY: f64 = 0.60;

const CLUTTER_DENSITY: f64 = 0.05;
const TORCH_BAND: f64 = 0.10;
const BANNER_BAND: f64 = 0.15;
const WEB_BAND: f64 = 0.17;

const MOSS_REROLL_PROBABILITY: f64 = 0.15;
const CRACK_REROLL_PROBABILITY: f64 = 0.15;

pub(super) fn decorate_map<R: Rand>(map: &mut MapData, rng: &mut R) {
    furnish_rooms(map, rng);
    scatter_clutter(map, rng);
    ornament_walls(map, rng);
    reroll_cosmetics(map, rng);
}

fn furnish_rooms<R: Rand>(map: &mut MapData, rng: &mut R) {
    let rooms = map.rooms.clone();
    for room in rooms {
        let roll = rng.next();
        if roll < DINING_BAND {
            furnish_dining(map, rng, room);
        } else if roll < STORAGE_BAND {
            furnish_storage(map, rng, room);
        } else if roll < LIBRARY_BAND {
            furnish_library(map, rng, room);
        } else if roll < BEDROOM_BAND {
            furnish_bedroom(map, room);
        }
    }
}

fn place_if_free(map: &mut MapData, pos: Pos, kind: PropKind) -> bool {
    if map.tile_at(pos).is_floor() && !map.occupied(pos) {
        map.props.push(Prop::new(pos, kind));
        return true;
    }
    false
}

fn furnish_dining<R: Rand>(map: &mut MapData, rng: &mut R, room: Room) {
    let center = room.center();
    if !place_if_free(map, center, PropKind::Table) {
        return;
    }
    for neighbor in orthogonal_neighbors(center) {
        if rng.chance(CHAIR_PROBABILITY) {
            place_if_free(map, neighbor, PropKind::Chair);
        }
    }
}

fn furnish_storage<R: Rand>(map: &mut MapData, rng: &mut R, room: Room) {
    for pos in interior_ring(room) {
        if rng.chance(STORAGE_TILE_PROBABILITY) {
            let kind = if rng.coin_flip() { PropKind::Crate } else { PropKind::Barrel };
            place_if_free(map, pos, kind);
        }
    }
}

fn furnish_library<R: Rand>(map: &mut MapData, rng: &mut R, room: Room) {
    for pos in interior_ring(room) {
        let along_side_wall =
            pos.x == room.x as i32 + 1 || pos.x == room.right() as i32 - 1;
        if along_side_wall && rng.chance(BOOKSHELF_PROBABILITY) {
            place_if_free(map, pos, PropKind::Bookshelf);
        }
    }
    place_if_free(map, room.center(), PropKind::Table);
}

fn furnish_bedroom(map: &mut MapData, room: Room) {
    place_if_free(map, Pos { y: room.y as i32 + 1, x: room.x as i32 + 1 }, PropKind::Chest);
}

/// Innermost ring of floor tiles just inside the room boundary.
fn interior_ring(room: Room) -> Vec<Pos> {
    let mut ring = Vec::new();
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            let on_ring = x == room.x + 1
                || x == room.right() - 1
                || y == room.y + 1
                || y == room.bottom() - 1;
            let inside = x > room.x && x < room.right() && y > room.y && y < room.bottom();
            if on_ring && inside {
                ring.push(Pos { y: y as i32, x: x as i32 });
            }
        }
    }
    ring
}

/// Weighted rubble, bones, grass tufts, and webs on corridor floor.
fn scatter_clutter<R: Rand>(map: &mut MapData, rng: &mut R) {
    for y in 1..(map.height - 1) {
        for x in 1..(map.width - 1) {
            let pos = Pos { y: y as i32, x: x as i32 };
            if map.tile_at(pos) != TileKind::Floor
                || map.rooms.iter().any(|room| room.contains(pos))
            {
                continue;
            }
            if !rng.chance(CLUTTER_DENSITY) || map.occupied(pos) {
                continue;
            }
            let roll = rng.next();
            let kind = if roll < 0.40 {
                PropKind::Rubble
            } else if roll < 0.70 {
                PropKind::Bones
            } else if roll < 0.90 {
                PropKind::GrassTuft
            } else {
                PropKind::Web
            };
            map.props.push(Prop::new(pos, kind));
        }
    }
}

fn ornament_walls<R: Rand>(map: &mut MapData, rng: &mut R) {
    for y in 0..map.height {
        for x in 0..map.width {
            let pos = Pos { y: y as i32, x: x as i32 };
            if !map.tile_at(pos).is_wall() {
                continue;
            }
            let fronts_floor = orthogonal_neighbors(pos)
                .iter()
                .any(|neighbor| map.tile_at(*neighbor).is_floor());
            if !fronts_floor || map.prop_at(pos) {
                continue;
            }
            let roll = rng.next();
            if roll < TORCH_BAND {
                map.props.push(Prop::new(pos, PropKind::Torch));
            } else if roll < BANNER_BAND {
                map.props.push(Prop::new(pos, PropKind::Banner));
            } else if roll < WEB_BAND {
                map.props.push(Prop::new(pos, PropKind::Web));
            }
        }
    }
}

/// Purely cosmetic variant rolls; classification of the variants matches the
/// base kinds, so visibility and movement are unaffected.
fn reroll_cosmetics<R: Rand>(map: &mut MapData, rng: &mut R) {
    for tile in &mut map.tiles {
        match tile {
            TileKind::Floor if rng.chance(MOSS_REROLL_PROBABILITY) => {
                *tile = TileKind::FloorMoss;
            }
            TileKind::Wall if rng.chance(CRACK_REROLL_PROBABILITY) => {
                *tile = TileKind::WallCracked;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::rng::SeededRand;

    use super::super::rooms::generate_rooms;
    use super::*;

    #[test]
    fn decoration_never_changes_passability_or_opacity() {
        let mut rng = SeededRand::from_seed(8);
        let mut map = generate_rooms(&mut rng, 60, 40, 2);
        let walkable_before: Vec<bool> = map.tiles.iter().map(|t| t.is_walkable()).collect();
        let opaque_before: Vec<bool> = map.tiles.iter().map(|t| t.is_opaque()).collect();

        decorate_map(&mut map, &mut rng);

        let walkable_after: Vec<bool> = map.tiles.iter().map(|t| t.is_walkable()).collect();
        let opaque_after: Vec<bool> = map.tiles.iter().map(|t| t.is_opaque()).collect();
        assert_eq!(walkable_before, walkable_after);
        assert_eq!(opaque_before, opaque_after);
    }

    #[test]
    fn decoration_never_double_books_a_tile() {
        let mut rng = SeededRand::from_seed(44);
        let mut map = generate_rooms(&mut rng, 60, 40, 3);
        decorate_map(&mut map, &mut rng);

        let mut per_tile = BTreeMap::new();
        for prop in &map.props {
            *per_tile.entry(prop.pos).or_insert(0_usize) += 1;
        }
        for (pos, count) in per_tile {
            assert_eq!(count, 1, "tile {pos:?} hosts {count} props");
        }
    }

    #[test]
    fn furniture_lands_only_inside_rooms() {
        let mut rng = SeededRand::from_seed(90);
        let mut map = generate_rooms(&mut rng, 60, 40, 2);
        let before = map.props.len();
        decorate_map(&mut map, &mut rng);

        let furniture = [
            PropKind::Table,
            PropKind::Chair,
            PropKind::Crate,
            PropKind::Barrel,
            PropKind::Bookshelf,
            PropKind::Chest,
        ];
        for prop in map.props.iter().skip(before) {
            if furniture.contains(&prop.kind) {
                assert!(
                    map.rooms.iter().any(|room| room.contains(prop.pos)),
                    "furniture at {:?} is outside every room",
                    prop.pos
                );
            }
        }
    }
}
