//! Public data models for generated maps, props, and NPC placements.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Pos, Theme, TileKind};

/// Axis-aligned room rectangle in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Room {
    pub fn right(self) -> usize {
        self.x + self.w - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.h - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + self.h / 2) as i32, x: (self.x + self.w / 2) as i32 }
    }

    pub fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            w: expanded_right - expanded_x + 1,
            h: expanded_bottom - expanded_y + 1,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) >= self.x
            && (pos.x as usize) <= self.right()
            && (pos.y as usize) >= self.y
            && (pos.y as usize) <= self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropKind {
    Torch,
    Table,
    Chair,
    Crate,
    Barrel,
    Bookshelf,
    Chest,
    Bed,
    Fireplace,
    Wardrobe,
    Dresser,
    Rubble,
    Bones,
    GrassTuft,
    Web,
    Banner,
    Stall,
    Tombstone,
    Anvil,
    Forge,
    Tree,
    Pier,
    Well,
    Trapdoor,
    CaveEntrance,
}

impl PropKind {
    pub fn glyph(self) -> char {
        match self {
            PropKind::Torch => '!',
            PropKind::Table => 'T',
            PropKind::Chair => 'h',
            PropKind::Crate => 'x',
            PropKind::Barrel => 'o',
            PropKind::Bookshelf => 'B',
            PropKind::Chest => '$',
            PropKind::Bed => 'b',
            PropKind::Fireplace => 'f',
            PropKind::Wardrobe => 'W',
            PropKind::Dresser => 'd',
            PropKind::Rubble => ',',
            PropKind::Bones => '%',
            PropKind::GrassTuft => '"',
            PropKind::Web => '*',
            PropKind::Banner => '|',
            PropKind::Stall => 'S',
            PropKind::Tombstone => '+',
            PropKind::Anvil => 'A',
            PropKind::Forge => 'F',
            PropKind::Tree => 't',
            PropKind::Pier => '=',
            PropKind::Well => 'O',
            PropKind::Trapdoor => '_',
            PropKind::CaveEntrance => '<',
        }
    }
}

/// Decorative or interactive object anchored to one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prop {
    pub pos: Pos,
    pub kind: PropKind,
    pub glyph: char,
}

impl Prop {
    pub fn new(pos: Pos, kind: PropKind) -> Self {
        Self { pos, kind, glyph: kind.glyph() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcSpawn {
    pub pos: Pos,
    pub name: String,
    pub dialogue: Vec<String>,
    pub portrait: Option<String>,
}

/// One generated level. Superseded wholesale on level transitions; the only
/// structural mutation external collaborators may perform afterwards is
/// `DoorClosed` <-> `DoorOpen` via `set_tile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapData {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub rooms: Vec<Room>,
    pub props: Vec<Prop>,
    pub npcs: Vec<NpcSpawn>,
    pub level: u32,
    pub theme: Theme,
    /// Validated player start. `None` only before spawn validation runs.
    pub start: Option<Pos>,
}

impl MapData {
    pub(crate) fn filled(width: usize, height: usize, fill: TileKind, level: u32, theme: Theme) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width * height],
            rooms: Vec::new(),
            props: Vec::new(),
            npcs: Vec::new(),
            level,
            theme,
            start: None,
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// Out-of-bounds reads as `Wall` so callers never index past the grid.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let index = (pos.y as usize) * self.width + (pos.x as usize);
        self.tiles[index] = tile;
    }

    pub fn prop_at(&self, pos: Pos) -> bool {
        self.props.iter().any(|prop| prop.pos == pos)
    }

    pub fn npc_at(&self, pos: Pos) -> bool {
        self.npcs.iter().any(|npc| npc.pos == pos)
    }

    pub fn occupied(&self, pos: Pos) -> bool {
        self.prop_at(pos) || self.npc_at(pos)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(tile_code(*tile));
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.w, room.h] {
                bytes.extend((value as u32).to_le_bytes());
            }
        }

        bytes.extend((self.props.len() as u32).to_le_bytes());
        for prop in &self.props {
            bytes.extend(prop.pos.y.to_le_bytes());
            bytes.extend(prop.pos.x.to_le_bytes());
            bytes.extend((prop.glyph as u32).to_le_bytes());
        }

        bytes.extend((self.npcs.len() as u32).to_le_bytes());
        for npc in &self.npcs {
            bytes.extend(npc.pos.y.to_le_bytes());
            bytes.extend(npc.pos.x.to_le_bytes());
            bytes.extend((npc.name.len() as u32).to_le_bytes());
            bytes.extend(npc.name.as_bytes());
        }

        bytes.extend(self.level.to_le_bytes());
        bytes.push(match self.theme {
            Theme::Village => 0,
            Theme::Dungeon => 1,
            Theme::Caverns => 2,
            Theme::Depths => 3,
        });
        if let Some(start) = self.start {
            bytes.extend(start.y.to_le_bytes());
            bytes.extend(start.x.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn tile_code(tile: TileKind) -> u8 {
    match tile {
        TileKind::Wall => 0,
        TileKind::WallWood => 1,
        TileKind::WallCracked => 2,
        TileKind::Floor => 3,
        TileKind::FloorMoss => 4,
        TileKind::FloorGrass => 5,
        TileKind::FloorDirt => 6,
        TileKind::Water => 7,
        TileKind::Lava => 8,
        TileKind::DoorClosed => 9,
        TileKind::DoorOpen => 10,
        TileKind::Stairs => 11,
    }
}
