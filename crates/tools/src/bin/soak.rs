use anyhow::Result;
use clap::Parser;
use game_core::{Biome, MapData, MapGenerator, Pos, TileKind, biome_for_level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 64)]
    seeds: u64,
    #[arg(short, long, default_value_t = 12)]
    levels: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Soaking {} seeds across {} levels...", args.seeds, args.levels);
    let mut generated = 0_usize;
    for seed in 0..args.seeds {
        let generator = MapGenerator::new(seed, 60, 40)
            .map_err(|e| anyhow::anyhow!("generator rejected fixed dimensions: {:?}", e))?;
        for level in 0..args.levels {
            let map = generator.generate(level);
            check_invariants(&map, seed, level);
            generated += 1;
        }
    }

    println!("Soak completed: {generated} maps clean.");
    Ok(())
}

fn check_invariants(map: &MapData, seed: u64, level: u32) {
    assert_eq!(map.tiles.len(), map.width * map.height, "seed {seed} level {level}: bad grid size");

    for x in 0..map.width as i32 {
        for y in [0, map.height as i32 - 1] {
            assert!(
                !map.tile_at(Pos { y, x }).is_walkable(),
                "seed {seed} level {level}: open border tile at y={y} x={x}"
            );
        }
    }
    for y in 0..map.height as i32 {
        for x in [0, map.width as i32 - 1] {
            assert!(
                !map.tile_at(Pos { y, x }).is_walkable(),
                "seed {seed} level {level}: open border tile at y={y} x={x}"
            );
        }
    }

    for left in 0..map.rooms.len() {
        for right in (left + 1)..map.rooms.len() {
            assert!(
                !map.rooms[left].intersects(&map.rooms[right]),
                "seed {seed} level {level}: overlapping rooms"
            );
        }
    }

    let stairs = map.tiles.iter().filter(|tile| **tile == TileKind::Stairs).count();
    let roomless_dungeon = biome_for_level(level) == Biome::Rooms && map.rooms.is_empty();
    if !roomless_dungeon {
        assert!(stairs >= 1, "seed {seed} level {level}: no stairs tile");
    }

    let start = map.start.unwrap_or_else(|| panic!("seed {seed} level {level}: no start tile"));
    assert!(
        start.y >= 1
            && start.x >= 1
            && (start.y as usize) <= map.height - 2
            && (start.x as usize) <= map.width - 2,
        "seed {seed} level {level}: start {start:?} outside the interior margin"
    );

    for prop in &map.props {
        assert!(map.in_bounds(prop.pos), "seed {seed} level {level}: prop out of bounds");
    }
    for npc in &map.npcs {
        assert!(map.in_bounds(npc.pos), "seed {seed} level {level}: npc out of bounds");
    }
}
