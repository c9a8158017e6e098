//! Hand-composed village level: houses on a grass field, dirt paths to the
//! dungeon entrance, villagers, amenities, and hidden content.

mod amenities;

use crate::rng::Rand;
use crate::types::{Pos, Theme, TileKind};

use super::grid::{manhattan, orthogonal_neighbors, seal_border};
use super::model::{MapData, NpcSpawn, Prop, PropKind, Room};

pub(super) const VILLAGE_WIDTH: usize = 50;
pub(super) const VILLAGE_HEIGHT: usize = 40;

const MAX_HOUSES: usize = 6;
const HOUSE_PLACEMENT_ATTEMPTS: usize = 40;
const HOUSE_MIN_EDGE: usize = 6;
const HOUSE_MAX_EDGE: usize = 11;
const HOUSE_PADDING: usize = 2;

const FIREPLACE_PROBABILITY: f64 = 0.70;
const WARDROBE_PROBABILITY: f64 = 0.60;
const DRESSER_PROBABILITY: f64 = 0.60;

const VILLAGER_BUDGET: usize = 5;
const VILLAGER_PLACEMENT_ATTEMPTS: usize = 50;
const VILLAGER_MIN_START_DISTANCE: u32 = 4;

const TREE_DENSITY: f64 = 0.05;
const HIDDEN_CHEST_PROBABILITY: f64 = 0.15;
const SECLUDED_SITE_ATTEMPTS: usize = 50;

const VILLAGER_ROSTER: [(&str, &str); 5] = [
    ("Mira", "Fresh bread, if the oven holds."),
    ("Aldric", "My roof leaks every spring."),
    ("Petra", "Stay clear of the deep woods at night."),
    ("Tomas", "I heard rattling under the tavern floor."),
    ("Greta", "The graveyard gate squeaks louder these days."),
];

pub(super) fn compose_village<R: Rand>(rng: &mut R, level: u32) -> MapData {
    let mut map =
        MapData::filled(VILLAGE_WIDTH, VILLAGE_HEIGHT, TileKind::FloorGrass, level, Theme::Village);
    seal_border(&mut map, TileKind::Wall);

    place_houses(&mut map, rng);
    let entrance = place_dungeon_entrance(&mut map);
    carve_paths_to_entrance(&mut map, entrance);

    let start = choose_start_tile(&mut map, entrance);
    map.start = Some(start);
    seed_guide(&mut map, start, entrance);
    seed_villagers(&mut map, rng, start);

    amenities::build_amenities(&mut map, rng, entrance, start);

    scatter_trees(&mut map, rng, start);
    place_hidden_chest(&mut map, rng);
    place_cellar_trapdoor(&mut map, rng);
    place_cave_entrance(&mut map, rng);

    map
}

fn place_houses<R: Rand>(map: &mut MapData, rng: &mut R) {
    let mut attempts = 0;
    while map.rooms.len() < MAX_HOUSES && attempts < HOUSE_PLACEMENT_ATTEMPTS {
        attempts += 1;
        let w = rng.range(HOUSE_MIN_EDGE, HOUSE_MAX_EDGE);
        let h = rng.range(HOUSE_MIN_EDGE, HOUSE_MAX_EDGE);
        let candidate = Room {
            x: rng.range(2, map.width - 2 - w),
            y: rng.range(2, map.height - 2 - h),
            w,
            h,
        };
        let padded = candidate.expanded(HOUSE_PADDING);
        if map.rooms.iter().any(|existing| existing.intersects(&padded)) {
            continue;
        }
        build_house(map, rng, candidate);
        map.rooms.push(candidate);
    }
}

fn build_house<R: Rand>(map: &mut MapData, rng: &mut R, house: Room) {
    for y in house.y..=house.bottom() {
        for x in house.x..=house.right() {
            let on_perimeter =
                y == house.y || y == house.bottom() || x == house.x || x == house.right();
            let tile = if on_perimeter { TileKind::WallWood } else { TileKind::Floor };
            map.tiles[y * map.width + x] = tile;
        }
    }

    // One door on a randomly chosen side, never on a corner.
    let door = match rng.range(0, 3) {
        0 => Pos { y: house.y as i32, x: rng.range(house.x + 1, house.right() - 1) as i32 },
        1 => Pos { y: house.bottom() as i32, x: rng.range(house.x + 1, house.right() - 1) as i32 },
        2 => Pos { y: rng.range(house.y + 1, house.bottom() - 1) as i32, x: house.x as i32 },
        _ => Pos { y: rng.range(house.y + 1, house.bottom() - 1) as i32, x: house.right() as i32 },
    };
    map.set_tile(door, TileKind::DoorClosed);

    furnish_house(map, rng, house);
}

fn furnish_house<R: Rand>(map: &mut MapData, rng: &mut R, house: Room) {
    let corners = [
        (Pos { y: house.y as i32 + 1, x: house.x as i32 + 1 }, PropKind::Bed, 1.0),
        (
            Pos { y: house.y as i32 + 1, x: house.right() as i32 - 1 },
            PropKind::Fireplace,
            FIREPLACE_PROBABILITY,
        ),
        (
            Pos { y: house.bottom() as i32 - 1, x: house.x as i32 + 1 },
            PropKind::Wardrobe,
            WARDROBE_PROBABILITY,
        ),
    ];
    for (pos, kind, probability) in corners {
        if map.tile_at(pos) == TileKind::Floor && !map.occupied(pos) && rng.chance(probability) {
            map.props.push(Prop::new(pos, kind));
        }
    }

    let last_corner = Pos { y: house.bottom() as i32 - 1, x: house.right() as i32 - 1 };
    if map.tile_at(last_corner) == TileKind::Floor
        && !map.occupied(last_corner)
        && rng.chance(DRESSER_PROBABILITY)
    {
        let kind = if rng.coin_flip() { PropKind::Dresser } else { PropKind::Chest };
        map.props.push(Prop::new(last_corner, kind));
    }
}

/// Scans rightward from the horizontal center for the first grass tile and
/// marks it as the dungeon entrance.
fn place_dungeon_entrance(map: &mut MapData) -> Pos {
    let row = (map.height / 2) as i32;
    for x in (map.width / 2)..(map.width - 1) {
        let pos = Pos { y: row, x: x as i32 };
        if map.tile_at(pos) == TileKind::FloorGrass {
            map.set_tile(pos, TileKind::Stairs);
            return pos;
        }
    }
    for y in 1..(map.height - 1) {
        for x in 1..(map.width - 1) {
            let pos = Pos { y: y as i32, x: x as i32 };
            if map.tile_at(pos) == TileKind::FloorGrass {
                map.set_tile(pos, TileKind::Stairs);
                return pos;
            }
        }
    }
    // A village with no grass left cannot occur with the fixed house budget;
    // fall back to the center so the invariant of one entrance still holds.
    let center = Pos { y: (map.height / 2) as i32, x: (map.width / 2) as i32 };
    map.set_tile(center, TileKind::Stairs);
    center
}

/// Greedy diagonal-biased stepping; converts grass to dirt tile-by-tile and
/// crosses obstacles cosmetically rather than routing around them.
fn carve_paths_to_entrance(map: &mut MapData, entrance: Pos) {
    let centers: Vec<Pos> = map.rooms.iter().map(|house| house.center()).collect();
    for center in centers {
        let mut pos = center;
        while pos != entrance {
            pos = Pos {
                y: pos.y + (entrance.y - pos.y).signum(),
                x: pos.x + (entrance.x - pos.x).signum(),
            };
            if map.tile_at(pos) == TileKind::FloorGrass {
                map.set_tile(pos, TileKind::FloorDirt);
            }
        }
    }
}

/// Start lands beside the entrance; the well goes on the nearest free grass
/// neighbor so the square reads as the village green.
fn choose_start_tile(map: &mut MapData, entrance: Pos) -> Pos {
    let preferred = Pos { y: entrance.y, x: entrance.x - 1 };
    let start = if map.tile_at(preferred).is_floor() { preferred } else { entrance };

    for neighbor in orthogonal_neighbors(entrance) {
        if neighbor != start
            && map.tile_at(neighbor) == TileKind::FloorGrass
            && !map.occupied(neighbor)
        {
            map.props.push(Prop::new(neighbor, PropKind::Well));
            break;
        }
    }
    start
}

fn seed_guide(map: &mut MapData, start: Pos, entrance: Pos) {
    for neighbor in orthogonal_neighbors(start) {
        if neighbor != entrance && map.tile_at(neighbor).is_floor() && !map.occupied(neighbor) {
            map.npcs.push(NpcSpawn {
                pos: neighbor,
                name: "Elder Rowan".to_string(),
                dialogue: vec![
                    "Welcome to Hearthmere, traveler.".to_string(),
                    "The old stairs by the well lead down into the dark.".to_string(),
                ],
                portrait: Some("elder_rowan".to_string()),
            });
            return;
        }
    }
}

fn seed_villagers<R: Rand>(map: &mut MapData, rng: &mut R, start: Pos) {
    for (name, line) in VILLAGER_ROSTER.iter().take(VILLAGER_BUDGET) {
        for _ in 0..VILLAGER_PLACEMENT_ATTEMPTS {
            let pos = Pos {
                y: rng.range(1, map.height - 2) as i32,
                x: rng.range(1, map.width - 2) as i32,
            };
            if map.tile_at(pos).is_floor()
                && manhattan(pos, start) >= VILLAGER_MIN_START_DISTANCE
                && !map.occupied(pos)
            {
                map.npcs.push(NpcSpawn {
                    pos,
                    name: (*name).to_string(),
                    dialogue: vec![(*line).to_string()],
                    portrait: None,
                });
                break;
            }
        }
    }
}

fn scatter_trees<R: Rand>(map: &mut MapData, rng: &mut R, start: Pos) {
    for y in 1..(map.height - 1) {
        for x in 1..(map.width - 1) {
            let pos = Pos { y: y as i32, x: x as i32 };
            if map.tile_at(pos) != TileKind::FloorGrass || pos == start || map.occupied(pos) {
                continue;
            }
            if rng.chance(TREE_DENSITY) {
                map.props.push(Prop::new(pos, PropKind::Tree));
            }
        }
    }
}

/// A tile is secluded when at least three of its orthogonal neighbors block
/// movement.
fn is_secluded(map: &MapData, pos: Pos) -> bool {
    orthogonal_neighbors(pos).iter().filter(|neighbor| !map.tile_at(**neighbor).is_walkable()).count()
        >= 3
}

fn place_hidden_chest<R: Rand>(map: &mut MapData, rng: &mut R) {
    if !rng.chance(HIDDEN_CHEST_PROBABILITY) {
        return;
    }
    for _ in 0..SECLUDED_SITE_ATTEMPTS {
        let pos =
            Pos { y: rng.range(1, map.height - 2) as i32, x: rng.range(1, map.width - 2) as i32 };
        if map.tile_at(pos).is_floor() && !map.occupied(pos) && is_secluded(map, pos) {
            map.props.push(Prop::new(pos, PropKind::Chest));
            return;
        }
    }
    log::debug!("no secluded tile for the hidden chest; skipping");
}

fn place_cellar_trapdoor<R: Rand>(map: &mut MapData, rng: &mut R) {
    if map.rooms.is_empty() {
        return;
    }
    let house = map.rooms[rng.range(0, map.rooms.len() - 1)];
    let corners = [
        Pos { y: house.y as i32 + 1, x: house.x as i32 + 1 },
        Pos { y: house.y as i32 + 1, x: house.right() as i32 - 1 },
        Pos { y: house.bottom() as i32 - 1, x: house.x as i32 + 1 },
        Pos { y: house.bottom() as i32 - 1, x: house.right() as i32 - 1 },
    ];
    let first = rng.range(0, corners.len() - 1);
    for offset in 0..corners.len() {
        let pos = corners[(first + offset) % corners.len()];
        if map.tile_at(pos) == TileKind::Floor && !map.occupied(pos) {
            map.props.push(Prop::new(pos, PropKind::Trapdoor));
            return;
        }
    }
}

fn place_cave_entrance<R: Rand>(map: &mut MapData, rng: &mut R) {
    for _ in 0..SECLUDED_SITE_ATTEMPTS {
        let pos =
            Pos { y: rng.range(1, map.height - 2) as i32, x: rng.range(1, map.width - 2) as i32 };
        let outdoors = matches!(map.tile_at(pos), TileKind::FloorGrass | TileKind::FloorDirt);
        if outdoors && !map.occupied(pos) && is_secluded(map, pos) {
            map.props.push(Prop::new(pos, PropKind::CaveEntrance));
            return;
        }
    }
    log::debug!("no secluded outdoor tile for the cave entrance; skipping");
}
