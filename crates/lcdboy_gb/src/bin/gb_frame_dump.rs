use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use lcdboy_gb::machine::debug_view::{self, BACKGROUND_SIZE, TILE_SHEET_HEIGHT, TILE_SHEET_WIDTH};
use lcdboy_gb::{Cartridge, GameBoy, GameBoyConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: gb_frame_dump <rom_path> [frames] [frame|tiles|bg] [out.pgm]";

/// Grey level for each 2-bit color index, lightest first.
const SHADES: [u8; 4] = [255, 170, 85, 0];

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom_path) = args.next().map(PathBuf::from) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let frames: u32 = match args.next() {
        Some(s) => s
            .parse()
            .with_context(|| format!("invalid frame count '{s}'"))?,
        None => 120,
    };
    let view = args.next().unwrap_or_else(|| "frame".to_string());
    let out_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{view}.pgm")));

    let cartridge = Cartridge::load(&rom_path)?;
    let mut gb = GameBoy::with_cartridge(GameBoyConfig::default(), &cartridge);

    let mut ran = 0;
    while ran < frames {
        gb.step_frame();
        ran += 1;
        if let Some(fault) = gb.fault() {
            eprintln!(
                "Stopped after {} frames: unused opcode 0x{:02X} at 0x{:04X}",
                ran, fault.opcode, fault.address
            );
            break;
        }
    }

    let (pixels, width, height) = match view.as_str() {
        "frame" => (gb.framebuffer().to_vec(), SCREEN_WIDTH, SCREEN_HEIGHT),
        "tiles" => (
            debug_view::tile_sheet(gb.memory()),
            TILE_SHEET_WIDTH,
            TILE_SHEET_HEIGHT,
        ),
        "bg" => (
            debug_view::background_map(gb.memory(), gb.ppu().control()),
            BACKGROUND_SIZE,
            BACKGROUND_SIZE,
        ),
        other => bail!("unknown view '{other}'; expected frame, tiles or bg"),
    };

    let mut out = format!("P5\n{width} {height}\n255\n").into_bytes();
    out.extend(pixels.iter().map(|&c| SHADES[(c & 0x03) as usize]));
    std::fs::write(&out_path, &out)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    let serial = gb.take_serial_output();
    if !serial.is_empty() {
        println!("Serial: {}", String::from_utf8_lossy(&serial));
    }
    println!(
        "Wrote {}x{} {} view after {} frames to '{}'",
        width,
        height,
        view,
        ran,
        out_path.display()
    );
    Ok(())
}
