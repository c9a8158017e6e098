use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Closed set of tile kinds. Passability, opacity, and spawnability are
/// derived here and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    WallWood,
    WallCracked,
    Floor,
    FloorMoss,
    FloorGrass,
    FloorDirt,
    Water,
    Lava,
    DoorClosed,
    DoorOpen,
    Stairs,
}

impl TileKind {
    /// Blocks line of sight. Closed doors are opaque until opened.
    pub fn is_opaque(self) -> bool {
        match self {
            TileKind::Wall | TileKind::WallWood | TileKind::WallCracked | TileKind::DoorClosed => {
                true
            }
            TileKind::Floor
            | TileKind::FloorMoss
            | TileKind::FloorGrass
            | TileKind::FloorDirt
            | TileKind::Water
            | TileKind::Lava
            | TileKind::DoorOpen
            | TileKind::Stairs => false,
        }
    }

    /// Can be stepped onto once doors are opened. Lava is a hazard, not an
    /// obstacle; water is an obstacle.
    pub fn is_walkable(self) -> bool {
        match self {
            TileKind::Floor
            | TileKind::FloorMoss
            | TileKind::FloorGrass
            | TileKind::FloorDirt
            | TileKind::Lava
            | TileKind::DoorClosed
            | TileKind::DoorOpen
            | TileKind::Stairs => true,
            TileKind::Wall | TileKind::WallWood | TileKind::WallCracked | TileKind::Water => false,
        }
    }

    /// Plain ground suitable for spawning an actor or anchoring a prop.
    pub fn is_floor(self) -> bool {
        matches!(
            self,
            TileKind::Floor | TileKind::FloorMoss | TileKind::FloorGrass | TileKind::FloorDirt
        )
    }

    pub fn is_wall(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::WallWood | TileKind::WallCracked)
    }
}

/// Rendering theme attached to a generated map, selected by the biome router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Theme {
    Village,
    Dungeon,
    Caverns,
    Depths,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    InvalidDimensions { width: i32, height: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_doors_are_opaque_and_open_doors_are_not() {
        assert!(TileKind::DoorClosed.is_opaque());
        assert!(!TileKind::DoorOpen.is_opaque());
    }

    #[test]
    fn cosmetic_variants_share_classification_with_their_base_kind() {
        assert_eq!(TileKind::FloorMoss.is_walkable(), TileKind::Floor.is_walkable());
        assert_eq!(TileKind::FloorMoss.is_opaque(), TileKind::Floor.is_opaque());
        assert_eq!(TileKind::WallCracked.is_walkable(), TileKind::Wall.is_walkable());
        assert_eq!(TileKind::WallCracked.is_opaque(), TileKind::Wall.is_opaque());
    }

    #[test]
    fn lava_is_walkable_but_water_is_not() {
        assert!(TileKind::Lava.is_walkable());
        assert!(!TileKind::Water.is_walkable());
    }
}
