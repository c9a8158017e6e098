//! Organic cave generation: cellular-automaton smoothing over seeded noise,
//! plus the deep-caverns lava overlay.

use crate::rng::Rand;
use crate::types::{Pos, Theme, TileKind};

use super::grid::{place_stairs_on_random_floor, seal_border, wall_neighbor_count};
use super::model::MapData;

const SEED_WALL_PROBABILITY: f64 = 0.45;
const SMOOTHING_PASSES: usize = 5;
const LAVA_PROBABILITY: f64 = 0.05;

/// Cellular-automaton cave. The only generator whose normal output carries
/// an empty room list.
pub(super) fn generate_caves<R: Rand>(
    rng: &mut R,
    width: usize,
    height: usize,
    level: u32,
) -> MapData {
    let mut map = MapData::filled(width, height, TileKind::Wall, level, Theme::Caverns);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let tile = if rng.chance(SEED_WALL_PROBABILITY) { TileKind::Wall } else { TileKind::Floor };
            map.tiles[y * width + x] = tile;
        }
    }

    for _ in 0..SMOOTHING_PASSES {
        smooth(&mut map);
    }

    seal_border(&mut map, TileKind::Wall);
    place_stairs_on_random_floor(&mut map, rng);
    map
}

/// Majority-neighbor rule: >4 wall neighbors turns a tile to wall, <4 to
/// floor, exactly 4 leaves it unchanged.
fn smooth(map: &mut MapData) {
    let mut next = map.tiles.clone();
    for y in 1..map.height.saturating_sub(1) {
        for x in 1..map.width.saturating_sub(1) {
            let pos = Pos { y: y as i32, x: x as i32 };
            let walls = wall_neighbor_count(map, pos);
            if walls > 4 {
                next[y * map.width + x] = TileKind::Wall;
            } else if walls < 4 {
                next[y * map.width + x] = TileKind::Floor;
            }
        }
    }
    map.tiles = next;
}

/// Cave with independent per-tile lava conversion. Lava is a hazard, not an
/// obstacle, so no connectivity re-check happens afterwards.
pub(super) fn generate_deep_caverns<R: Rand>(
    rng: &mut R,
    width: usize,
    height: usize,
    level: u32,
) -> MapData {
    let mut map = generate_caves(rng, width, height, level);
    map.theme = Theme::Depths;
    for tile in &mut map.tiles {
        if *tile == TileKind::Floor && rng.chance(LAVA_PROBABILITY) {
            *tile = TileKind::Lava;
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use crate::rng::SeededRand;

    use super::*;

    #[test]
    fn caves_keep_the_requested_dimensions_and_a_sealed_border() {
        let mut rng = SeededRand::from_seed(20);
        let map = generate_caves(&mut rng, 20, 20, 5);
        assert_eq!(map.width, 20);
        assert_eq!(map.height, 20);
        assert_eq!(map.tiles.len(), 400);
        for x in 0..20 {
            assert_eq!(map.tile_at(Pos { y: 0, x }), TileKind::Wall);
            assert_eq!(map.tile_at(Pos { y: 19, x }), TileKind::Wall);
        }
        for y in 0..20 {
            assert_eq!(map.tile_at(Pos { y, x: 0 }), TileKind::Wall);
            assert_eq!(map.tile_at(Pos { y, x: 19 }), TileKind::Wall);
        }
    }

    #[test]
    fn caves_always_carry_stairs_and_no_rooms() {
        for seed in [1_u64, 8, 99, 4_242] {
            let mut rng = SeededRand::from_seed(seed);
            let map = generate_caves(&mut rng, 40, 30, 6);
            assert!(map.rooms.is_empty());
            let stairs = map.tiles.iter().filter(|tile| **tile == TileKind::Stairs).count();
            assert_eq!(stairs, 1, "seed {seed} should place exactly one stairs tile");
        }
    }

    #[test]
    fn smoothing_leaves_a_balanced_tile_unchanged() {
        // Four diagonal walls around the probe make exactly 4 wall neighbors.
        let mut map = MapData::filled(7, 7, TileKind::Floor, 5, Theme::Caverns);
        for pos in [
            Pos { y: 2, x: 2 },
            Pos { y: 2, x: 4 },
            Pos { y: 4, x: 2 },
            Pos { y: 4, x: 4 },
        ] {
            map.set_tile(pos, TileKind::Wall);
        }
        let probe = Pos { y: 3, x: 3 };
        assert_eq!(wall_neighbor_count(&map, probe), 4);
        let before = map.tile_at(probe);
        smooth(&mut map);
        assert_eq!(map.tile_at(probe), before);
    }

    #[test]
    fn deep_caverns_only_convert_floor_to_lava() {
        let mut plain_rng = SeededRand::from_seed(31);
        let plain = generate_caves(&mut plain_rng, 40, 30, 10);
        let mut deep_rng = SeededRand::from_seed(31);
        let deep = generate_deep_caverns(&mut deep_rng, 40, 30, 10);

        for (before, after) in plain.tiles.iter().zip(deep.tiles.iter()) {
            if after == &TileKind::Lava {
                assert_eq!(before, &TileKind::Floor);
            } else {
                assert_eq!(before, after);
            }
        }
    }
}
