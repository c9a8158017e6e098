//! Procedural map generation domain split into coherent submodules.

pub mod model;

mod caves;
mod decoration;
mod drunkard;
mod generator;
mod grid;
mod rooms;
mod spawn;
mod village;

pub use generator::{Biome, MapGenerator, biome_for_level};
pub use model::{MapData, NpcSpawn, Prop, PropKind, Room};
pub use spawn::{find_valid_spawn, is_valid_spawn};

use crate::types::GenError;

pub fn generate_level(
    run_seed: u64,
    width: i32,
    height: i32,
    level: u32,
) -> Result<MapData, GenError> {
    Ok(MapGenerator::new(run_seed, width, height)?.generate(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_level_matches_map_generator_output() {
        let from_helper = generate_level(123, 60, 40, 2).expect("valid dimensions");
        let from_generator =
            MapGenerator::new(123, 60, 40).expect("valid dimensions").generate(2);
        assert_eq!(from_helper, from_generator);
    }

    #[test]
    fn generate_level_surfaces_invalid_dimensions() {
        assert!(generate_level(123, -1, 40, 2).is_err());
    }
}
