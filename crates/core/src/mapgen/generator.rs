//! Top-level generation pipeline: biome routing by level, the decoration
//! pass, and spawn validation.

use crate::rng::SeededRand;
use crate::types::GenError;

use super::caves::{generate_caves, generate_deep_caverns};
use super::decoration::decorate_map;
use super::drunkard::generate_drunkard;
use super::model::MapData;
use super::rooms::generate_rooms;
use super::spawn::find_valid_spawn;
use super::village::compose_village;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Biome {
    Village,
    Rooms,
    Caves,
    Tunnels,
    Depths,
}

pub fn biome_for_level(level: u32) -> Biome {
    match level {
        0 => Biome::Village,
        1..=4 => Biome::Rooms,
        5..=7 => Biome::Caves,
        8..=9 => Biome::Tunnels,
        _ => Biome::Depths,
    }
}

pub struct MapGenerator {
    run_seed: u64,
    width: usize,
    height: usize,
}

impl MapGenerator {
    /// Non-positive dimensions are the single generation-time error; every
    /// later step degrades gracefully instead of failing.
    pub fn new(run_seed: u64, width: i32, height: i32) -> Result<Self, GenError> {
        if width <= 0 || height <= 0 {
            return Err(GenError::InvalidDimensions { width, height });
        }
        Ok(Self { run_seed, width: width as usize, height: height as usize })
    }

    /// Pure function of `(run_seed, level)`: routes to a biome generator,
    /// decorates, and validates the start tile. The village composer owns
    /// its dimensions; every other biome uses the configured size.
    pub fn generate(&self, level: u32) -> MapData {
        let mut rng = SeededRand::for_level(self.run_seed, level);
        let mut map = match biome_for_level(level) {
            Biome::Village => compose_village(&mut rng, level),
            Biome::Rooms => generate_rooms(&mut rng, self.width, self.height, level),
            Biome::Caves => generate_caves(&mut rng, self.width, self.height, level),
            Biome::Tunnels => generate_drunkard(&mut rng, self.width, self.height, level),
            Biome::Depths => generate_deep_caverns(&mut rng, self.width, self.height, level),
        };

        decorate_map(&mut map, &mut rng);
        map.start = Some(find_valid_spawn(&map));
        map
    }
}

#[cfg(test)]
mod tests {
    use crate::mapgen::spawn::is_valid_spawn;
    use crate::types::Theme;

    use super::*;

    #[test]
    fn biome_routing_covers_every_level_band() {
        assert_eq!(biome_for_level(0), Biome::Village);
        assert_eq!(biome_for_level(1), Biome::Rooms);
        assert_eq!(biome_for_level(4), Biome::Rooms);
        assert_eq!(biome_for_level(5), Biome::Caves);
        assert_eq!(biome_for_level(8), Biome::Tunnels);
        assert_eq!(biome_for_level(10), Biome::Depths);
        assert_eq!(biome_for_level(42), Biome::Depths);
    }

    #[test]
    fn non_positive_dimensions_are_rejected_up_front() {
        assert!(matches!(
            MapGenerator::new(1, 0, 40),
            Err(GenError::InvalidDimensions { width: 0, height: 40 })
        ));
        assert!(matches!(
            MapGenerator::new(1, 60, -3),
            Err(GenError::InvalidDimensions { width: 60, height: -3 })
        ));
    }

    #[test]
    fn village_level_overrides_the_configured_dimensions() {
        let generator = MapGenerator::new(7, 60, 40).expect("valid dimensions");
        let village = generator.generate(0);
        assert_eq!(village.theme, Theme::Village);
        assert_eq!((village.width, village.height), (50, 40));

        let dungeon = generator.generate(1);
        assert_eq!(dungeon.theme, Theme::Dungeon);
        assert_eq!((dungeon.width, dungeon.height), (60, 40));
    }

    #[test]
    fn every_generated_level_carries_a_start_tile() {
        let generator = MapGenerator::new(2_024, 60, 40).expect("valid dimensions");
        for level in 0..12 {
            let map = generator.generate(level);
            let start = map.start.expect("pipeline always sets a start");
            assert!(
                is_valid_spawn(&map, start) || start.y == (map.height / 2) as i32,
                "level {level} start {start:?} is neither valid nor the documented fallback"
            );
        }
    }
}
