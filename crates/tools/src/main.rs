use anyhow::Result;
use clap::Parser;
use game_core::{MapData, MapGenerator, Pos, TileKind};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    #[arg(long, default_value_t = 60)]
    width: i32,
    #[arg(long, default_value_t = 40)]
    height: i32,
    /// Dump the full MapData as JSON instead of ASCII
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let generator = MapGenerator::new(args.seed, args.width, args.height)
        .map_err(|e| anyhow::anyhow!("invalid generator config: {:?}", e))?;
    let map = generator.generate(args.level);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    print!("{}", render_ascii(&map));
    println!(
        "seed {} level {} theme {:?}: {} rooms, {} props, {} npcs, fingerprint {:016x}",
        args.seed,
        args.level,
        map.theme,
        map.rooms.len(),
        map.props.len(),
        map.npcs.len(),
        map.fingerprint()
    );
    Ok(())
}

fn render_ascii(map: &MapData) -> String {
    let mut text = String::new();
    for y in 0..map.height as i32 {
        for x in 0..map.width as i32 {
            let pos = Pos { y, x };
            let glyph = if map.start == Some(pos) {
                '@'
            } else if map.npc_at(pos) {
                'N'
            } else if let Some(prop) = map.props.iter().find(|prop| prop.pos == pos) {
                prop.glyph
            } else {
                tile_glyph(map.tile_at(pos))
            };
            text.push(glyph);
        }
        text.push('\n');
    }
    text
}

fn tile_glyph(tile: TileKind) -> char {
    match tile {
        TileKind::Wall | TileKind::WallCracked => '#',
        TileKind::WallWood => 'H',
        TileKind::Floor => '.',
        TileKind::FloorMoss => '\'',
        TileKind::FloorGrass => ',',
        TileKind::FloorDirt => ':',
        TileKind::Water => '~',
        TileKind::Lava => '^',
        TileKind::DoorClosed => '+',
        TileKind::DoorOpen => '/',
        TileKind::Stairs => '>',
    }
}
