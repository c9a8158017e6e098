pub mod mapgen;
pub mod rng;
pub mod types;
pub mod visibility;

pub use mapgen::{
    Biome, MapData, MapGenerator, NpcSpawn, Prop, PropKind, Room, biome_for_level, find_valid_spawn,
    generate_level, is_valid_spawn,
};
pub use rng::{Rand, SeededRand, derive_level_seed};
pub use types::*;
pub use visibility::{ExploredSet, VisibleSet, compute_visible, extend_explored};
