//! Player spawn validation: a non-throwing search that always yields a
//! coordinate, even on a hypothetically fully-blocked map.

use crate::types::Pos;

use super::model::MapData;

/// True iff the tile sits inside the 1-tile interior margin, is plain
/// walkable floor, and hosts no prop or NPC.
pub fn is_valid_spawn(map: &MapData, pos: Pos) -> bool {
    let inside_margin = pos.x >= 1
        && pos.y >= 1
        && (pos.x as usize) <= map.width.saturating_sub(2)
        && (pos.y as usize) <= map.height.saturating_sub(2);
    inside_margin && map.tile_at(pos).is_floor() && !map.occupied(pos)
}

/// Keeps a pre-set valid start, then tries the first five room centers, then
/// ring-scans outward from the geometric center. The final fallback is the
/// center coordinate itself, unvalidated; upstream generators always leave a
/// walkable tile near the center, so in practice the scan finds one first.
pub fn find_valid_spawn(map: &MapData) -> Pos {
    if let Some(start) = map.start {
        if is_valid_spawn(map, start) {
            return start;
        }
    }

    for room in map.rooms.iter().take(5) {
        if is_valid_spawn(map, room.center()) {
            return room.center();
        }
    }

    let center = Pos { y: (map.height / 2) as i32, x: (map.width / 2) as i32 };
    let max_radius = map.width.max(map.height) as i32;
    for radius in 1..=max_radius {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dy.abs().max(dx.abs()) != radius {
                    continue;
                }
                let pos = Pos { y: center.y + dy, x: center.x + dx };
                if is_valid_spawn(map, pos) {
                    return pos;
                }
            }
        }
    }

    center
}

#[cfg(test)]
mod tests {
    use crate::types::{Theme, TileKind};

    use super::super::model::{Prop, PropKind};
    use super::*;

    fn walled_map() -> MapData {
        MapData::filled(21, 15, TileKind::Wall, 1, Theme::Dungeon)
    }

    #[test]
    fn preset_valid_start_is_kept() {
        let mut map = walled_map();
        let start = Pos { y: 3, x: 4 };
        map.set_tile(start, TileKind::FloorGrass);
        map.start = Some(start);
        assert_eq!(find_valid_spawn(&map), start);
    }

    #[test]
    fn occupied_preset_start_is_rejected() {
        let mut map = walled_map();
        let start = Pos { y: 3, x: 4 };
        map.set_tile(start, TileKind::Floor);
        map.start = Some(start);
        map.props.push(Prop::new(start, PropKind::Crate));

        let other = Pos { y: 9, x: 12 };
        map.set_tile(other, TileKind::Floor);
        assert_eq!(find_valid_spawn(&map), other);
    }

    #[test]
    fn ring_scan_finds_the_walkable_tile_nearest_the_center() {
        let mut map = walled_map();
        let tile = Pos { y: 7, x: 12 };
        map.set_tile(tile, TileKind::FloorMoss);
        assert_eq!(find_valid_spawn(&map), tile);
    }

    #[test]
    fn fully_blocked_map_falls_back_to_the_center() {
        let map = walled_map();
        assert_eq!(find_valid_spawn(&map), Pos { y: 7, x: 10 });
    }

    #[test]
    fn spawn_never_lands_on_the_border() {
        let mut map = walled_map();
        map.set_tile(Pos { y: 0, x: 5 }, TileKind::Floor);
        let spawn = find_valid_spawn(&map);
        assert!(spawn.y >= 1 && spawn.x >= 1);
        assert!((spawn.y as usize) <= map.height - 2 && (spawn.x as usize) <= map.width - 2);
    }
}
