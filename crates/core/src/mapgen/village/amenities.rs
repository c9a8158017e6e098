//! Village amenity builders. Each one claims clear grass through
//! `find_free_space` and silently skips itself when the village is too
//! crowded, keeping generation non-failing.

use crate::rng::Rand;
use crate::types::{Pos, TileKind};

use super::super::model::{MapData, NpcSpawn, Prop, PropKind, Room};

const PLACEMENT_ATTEMPTS: usize = 50;
const TOMBSTONE_DENSITY: f64 = 0.20;
const POND_EXPONENT: f64 = 2.5;

pub(in crate::mapgen) fn build_amenities<R: Rand>(
    map: &mut MapData,
    rng: &mut R,
    entrance: Pos,
    start: Pos,
) {
    build_marketplace(map, rng, entrance, start);
    build_graveyard(map, rng, entrance, start);
    build_tavern(map, rng, entrance, start);
    build_blacksmith(map, rng, entrance, start);
    build_pond(map, rng, entrance, start);
}

/// Samples up to 50 placements and accepts the first whose footprint is all
/// grass with no prop, NPC, entrance, or start tile inside a 1-tile halo.
fn find_free_space<R: Rand>(
    map: &MapData,
    rng: &mut R,
    w: usize,
    h: usize,
    entrance: Pos,
    start: Pos,
) -> Option<Room> {
    if w + 4 > map.width || h + 4 > map.height {
        return None;
    }
    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = Room {
            x: rng.range(2, map.width - 2 - w),
            y: rng.range(2, map.height - 2 - h),
            w,
            h,
        };
        if area_is_clear(map, candidate, entrance, start) {
            return Some(candidate);
        }
    }
    None
}

fn area_is_clear(map: &MapData, rect: Room, entrance: Pos, start: Pos) -> bool {
    for y in rect.y..=rect.bottom() {
        for x in rect.x..=rect.right() {
            if map.tile_at(Pos { y: y as i32, x: x as i32 }) != TileKind::FloorGrass {
                return false;
            }
        }
    }
    let halo = rect.expanded(1);
    if halo.contains(entrance) || halo.contains(start) {
        return false;
    }
    !map.props.iter().any(|prop| halo.contains(prop.pos))
        && !map.npcs.iter().any(|npc| halo.contains(npc.pos))
}

fn seed_npc(map: &mut MapData, pos: Pos, name: &str, line: &str, portrait: Option<&str>) {
    if map.tile_at(pos).is_floor() && !map.occupied(pos) {
        map.npcs.push(NpcSpawn {
            pos,
            name: name.to_string(),
            dialogue: vec![line.to_string()],
            portrait: portrait.map(str::to_string),
        });
    }
}

/// Open dirt plaza with a stall in each quadrant and the merchant in the
/// middle.
fn build_marketplace<R: Rand>(map: &mut MapData, rng: &mut R, entrance: Pos, start: Pos) {
    let Some(plaza) = find_free_space(map, rng, 9, 7, entrance, start) else {
        log::debug!("skipping marketplace: no free space");
        return;
    };
    fill_rect(map, plaza, TileKind::FloorDirt);

    let stalls = [
        Pos { y: plaza.y as i32 + 1, x: plaza.x as i32 + 1 },
        Pos { y: plaza.y as i32 + 1, x: plaza.right() as i32 - 1 },
        Pos { y: plaza.bottom() as i32 - 1, x: plaza.x as i32 + 1 },
        Pos { y: plaza.bottom() as i32 - 1, x: plaza.right() as i32 - 1 },
    ];
    for pos in stalls {
        if !map.occupied(pos) {
            map.props.push(Prop::new(pos, PropKind::Stall));
        }
    }

    seed_npc(
        map,
        plaza.center(),
        "Marla",
        "Finest goods this side of the hills.",
        Some("merchant_marla"),
    );
}

/// Fenced dirt yard with a gap in the north fence and scattered tombstones.
fn build_graveyard<R: Rand>(map: &mut MapData, rng: &mut R, entrance: Pos, start: Pos) {
    let Some(yard) = find_free_space(map, rng, 8, 6, entrance, start) else {
        log::debug!("skipping graveyard: no free space");
        return;
    };
    fill_rect(map, yard, TileKind::FloorDirt);

    let gate_x = (yard.x + yard.w / 2) as i32;
    for x in yard.x..=yard.right() {
        for y in [yard.y, yard.bottom()] {
            let pos = Pos { y: y as i32, x: x as i32 };
            if !(y == yard.y && pos.x == gate_x) {
                map.set_tile(pos, TileKind::WallWood);
            }
        }
    }
    for y in yard.y..=yard.bottom() {
        map.set_tile(Pos { y: y as i32, x: yard.x as i32 }, TileKind::WallWood);
        map.set_tile(Pos { y: y as i32, x: yard.right() as i32 }, TileKind::WallWood);
    }

    for y in (yard.y + 1)..yard.bottom() {
        for x in (yard.x + 1)..yard.right() {
            let pos = Pos { y: y as i32, x: x as i32 };
            if !map.occupied(pos) && rng.chance(TOMBSTONE_DENSITY) {
                map.props.push(Prop::new(pos, PropKind::Tombstone));
            }
        }
    }
}

/// Wood building with a south door, two tables, and the innkeeper behind
/// them.
fn build_tavern<R: Rand>(map: &mut MapData, rng: &mut R, entrance: Pos, start: Pos) {
    let Some(lot) = find_free_space(map, rng, 9, 7, entrance, start) else {
        log::debug!("skipping tavern: no free space");
        return;
    };

    for y in lot.y..=lot.bottom() {
        for x in lot.x..=lot.right() {
            let on_perimeter = y == lot.y || y == lot.bottom() || x == lot.x || x == lot.right();
            let tile = if on_perimeter { TileKind::WallWood } else { TileKind::Floor };
            map.tiles[y * map.width + x] = tile;
        }
    }
    let door = Pos { y: lot.bottom() as i32, x: (lot.x + lot.w / 2) as i32 };
    map.set_tile(door, TileKind::DoorClosed);

    for offset in [(2, 2), (2, lot.w as i32 - 3)] {
        let pos = Pos { y: lot.y as i32 + offset.0, x: lot.x as i32 + offset.1 };
        if map.tile_at(pos) == TileKind::Floor && !map.occupied(pos) {
            map.props.push(Prop::new(pos, PropKind::Table));
        }
    }

    seed_npc(
        map,
        Pos { y: lot.y as i32 + 1, x: (lot.x + lot.w / 2) as i32 },
        "Bram",
        "A warm meal and a warmer hearth.",
        None,
    );
}

/// Open-air dirt yard: anvil, forge, supply chest, and the smith.
fn build_blacksmith<R: Rand>(map: &mut MapData, rng: &mut R, entrance: Pos, start: Pos) {
    let Some(yard) = find_free_space(map, rng, 7, 5, entrance, start) else {
        log::debug!("skipping blacksmith: no free space");
        return;
    };
    fill_rect(map, yard, TileKind::FloorDirt);

    map.props.push(Prop::new(Pos { y: yard.center().y, x: yard.x as i32 + 1 }, PropKind::Anvil));
    map.props.push(Prop::new(Pos { y: yard.y as i32, x: yard.right() as i32 - 1 }, PropKind::Forge));
    map.props
        .push(Prop::new(Pos { y: yard.bottom() as i32, x: yard.right() as i32 - 1 }, PropKind::Chest));

    seed_npc(map, yard.center(), "Hagen", "Steel wants patience.", None);
}

/// Superellipse pond with a short pier and a fisher at its foot.
fn build_pond<R: Rand>(map: &mut MapData, rng: &mut R, entrance: Pos, start: Pos) {
    let Some(basin) = find_free_space(map, rng, 10, 8, entrance, start) else {
        log::debug!("skipping pond: no free space");
        return;
    };

    let center = basin.center();
    let radius_x = (basin.w as f64 - 1.0) / 2.0;
    let radius_y = (basin.h as f64 - 1.0) / 2.0;
    for y in basin.y..=basin.bottom() {
        for x in basin.x..=basin.right() {
            let nx = ((x as f64 - center.x as f64) / radius_x).abs();
            let ny = ((y as f64 - center.y as f64) / radius_y).abs();
            if nx.powf(POND_EXPONENT) + ny.powf(POND_EXPONENT) <= 1.0 {
                map.set_tile(Pos { y: y as i32, x: x as i32 }, TileKind::Water);
            }
        }
    }

    // Pier juts in from the west bank at the center row.
    let mut pier_base = None;
    for x in basin.x..=basin.right() {
        let pos = Pos { y: center.y, x: x as i32 };
        if map.tile_at(pos) == TileKind::Water {
            pier_base = Some(Pos { y: center.y, x: pos.x - 1 });
            for step in 0..3 {
                let plank = Pos { y: center.y, x: pos.x + step };
                if map.tile_at(plank) == TileKind::Water {
                    map.props.push(Prop::new(plank, PropKind::Pier));
                }
            }
            break;
        }
    }
    if let Some(base) = pier_base {
        seed_npc(map, base, "Odo", "The pond is deeper than it looks.", None);
    }
}

fn fill_rect(map: &mut MapData, rect: Room, tile: TileKind) {
    for y in rect.y..=rect.bottom() {
        for x in rect.x..=rect.right() {
            map.tiles[y * map.width + x] = tile;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rng::SeededRand;
    use crate::types::Theme;

    use super::*;

    fn open_meadow() -> MapData {
        let mut map = MapData::filled(50, 40, TileKind::FloorGrass, 0, Theme::Village);
        super::super::super::grid::seal_border(&mut map, TileKind::Wall);
        map
    }

    #[test]
    fn free_space_is_grass_only_with_an_empty_halo() {
        let mut map = open_meadow();
        map.props.push(Prop::new(Pos { y: 10, x: 10 }, PropKind::Tree));
        let mut rng = SeededRand::from_seed(6);

        let found = find_free_space(&map, &mut rng, 6, 5, Pos { y: 20, x: 30 }, Pos { y: 20, x: 29 })
            .expect("an open meadow has free space");
        assert!(!found.expanded(1).contains(Pos { y: 10, x: 10 }), "halo must exclude props");
        assert!(!found.expanded(1).contains(Pos { y: 20, x: 30 }), "halo must exclude entrance");
    }

    #[test]
    fn amenity_builders_skip_cleanly_when_nothing_fits() {
        // A map drowned in props leaves no clear halo anywhere.
        let mut map = open_meadow();
        for y in (2..38).step_by(2) {
            for x in (2..48).step_by(2) {
                map.props.push(Prop::new(Pos { y, x }, PropKind::Tree));
            }
        }
        let props_before = map.props.len();
        let npcs_before = map.npcs.len();
        let mut rng = SeededRand::from_seed(13);
        build_amenities(&mut map, &mut rng, Pos { y: 20, x: 30 }, Pos { y: 20, x: 29 });
        assert_eq!(map.props.len(), props_before);
        assert_eq!(map.npcs.len(), npcs_before);
    }

    #[test]
    fn pond_water_forms_inside_the_claimed_basin() {
        let mut map = open_meadow();
        let mut rng = SeededRand::from_seed(21);
        build_pond(&mut map, &mut rng, Pos { y: 2, x: 2 }, Pos { y: 2, x: 3 });
        let water: Vec<Pos> = (0..map.height as i32)
            .flat_map(|y| (0..map.width as i32).map(move |x| Pos { y, x }))
            .filter(|pos| map.tile_at(*pos) == TileKind::Water)
            .collect();
        assert!(!water.is_empty(), "pond should place water");
        for pos in &water {
            assert!(pos.y > 0 && pos.x > 0);
            assert!((pos.y as usize) < map.height - 1 && (pos.x as usize) < map.width - 1);
        }
    }

    #[test]
    fn graveyard_fence_has_a_gate() {
        let mut map = open_meadow();
        let mut rng = SeededRand::from_seed(35);
        build_graveyard(&mut map, &mut rng, Pos { y: 2, x: 2 }, Pos { y: 2, x: 3 });

        // At least one dirt tile sits flanked by fence wood: the gate.
        let dirt_in_fence: Vec<Pos> = (0..map.height as i32)
            .flat_map(|y| (0..map.width as i32).map(move |x| Pos { y, x }))
            .filter(|pos| map.tile_at(*pos) == TileKind::FloorDirt)
            .filter(|pos| {
                super::super::super::grid::orthogonal_neighbors(*pos)
                    .iter()
                    .filter(|n| map.tile_at(**n) == TileKind::WallWood)
                    .count()
                    >= 2
            })
            .collect();
        assert!(!dirt_in_fence.is_empty(), "graveyard gate should exist");
    }
}
