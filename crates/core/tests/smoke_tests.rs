use std::collections::{BTreeSet, VecDeque};

use game_core::{MapData, MapGenerator, Pos, TileKind};

fn reachable_from(map: &MapData, start: Pos) -> BTreeSet<Pos> {
    let mut seen = BTreeSet::from([start]);
    let mut open = VecDeque::from([start]);
    while let Some(pos) = open.pop_front() {
        for next in [
            Pos { y: pos.y - 1, x: pos.x },
            Pos { y: pos.y, x: pos.x + 1 },
            Pos { y: pos.y + 1, x: pos.x },
            Pos { y: pos.y, x: pos.x - 1 },
        ] {
            if map.tile_at(next).is_walkable() && seen.insert(next) {
                open.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn level_three_dungeon_on_sixty_by_forty() {
    let generator = MapGenerator::new(9_001, 60, 40).expect("valid dimensions");
    let map = generator.generate(3);

    assert!(!map.rooms.is_empty(), "a 60x40 dungeon always fits at least one room");
    assert!(map.tile_at(Pos { y: 0, x: 0 }).is_wall());

    let stairs = map.tiles.iter().filter(|tile| **tile == TileKind::Stairs).count();
    assert_eq!(stairs, 1, "exactly one stairs tile");

    let reachable = reachable_from(&map, map.rooms[0].center());
    for room in &map.rooms {
        assert!(
            reachable.contains(&room.center()),
            "room center {:?} unreachable from the first room",
            room.center()
        );
    }
}

#[test]
fn twenty_by_twenty_caves() {
    let generator = MapGenerator::new(404, 20, 20).expect("valid dimensions");
    let map = generator.generate(5);

    assert_eq!(map.width, 20);
    assert_eq!(map.height, 20);
    assert_eq!(map.tiles.len(), 400);
    for x in 0..20 {
        assert!(map.tile_at(Pos { y: 0, x }).is_wall());
        assert!(map.tile_at(Pos { y: 19, x }).is_wall());
    }
    for y in 0..20 {
        assert!(map.tile_at(Pos { y, x: 0 }).is_wall());
        assert!(map.tile_at(Pos { y, x: 19 }).is_wall());
    }

    let stairs = map.tiles.iter().filter(|tile| **tile == TileKind::Stairs).count();
    assert!(stairs >= 1, "caves always place stairs");
    assert!(map.rooms.is_empty(), "caves carry no room list");
}

#[test]
fn village_level_smoke() {
    let generator = MapGenerator::new(77, 60, 40).expect("valid dimensions");
    let map = generator.generate(0);

    assert!(!map.rooms.is_empty(), "the village places houses");
    let stairs = map.tiles.iter().filter(|tile| **tile == TileKind::Stairs).count();
    assert_eq!(stairs, 1, "one dungeon entrance");
    assert!(!map.npcs.is_empty(), "the village seeds NPCs");

    let start = map.start.expect("village start is always set");
    let entrance = (0..map.height as i32)
        .flat_map(|y| (0..map.width as i32).map(move |x| Pos { y, x }))
        .find(|pos| map.tile_at(*pos) == TileKind::Stairs)
        .expect("entrance exists");
    assert!(
        reachable_from(&map, start).contains(&entrance),
        "entrance must be walkable from the start"
    );
}

#[test]
fn deep_caverns_lava_never_touches_the_stairs() {
    let generator = MapGenerator::new(31_337, 60, 40).expect("valid dimensions");
    let map = generator.generate(10);

    let lava = map.tiles.iter().filter(|tile| **tile == TileKind::Lava).count();
    let stairs = map.tiles.iter().filter(|tile| **tile == TileKind::Stairs).count();
    assert_eq!(stairs, 1, "lava conversion must not consume the stairs");
    assert!(lava > 0, "a 60x40 deep cavern converts some floor to lava");
}
