use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use lcdboy::{App, HostInitInfo};
use lcdboy_gb::machine::BOOT_ROM_SIZE;
use lcdboy_gb::{Cartridge, GameBoy, GameBoyApp, GameBoyConfig};

const USAGE: &str = "Usage: lcdboy <rom.gb> [--frames N] [--fast] [--boot-rom PATH] [--quiet-serial]";

struct Args {
    rom: PathBuf,
    frames: Option<u64>,
    fast: bool,
    boot_rom: Option<PathBuf>,
    trace_serial: bool,
}

fn parse_args() -> Result<Args> {
    let mut rom = None;
    let mut frames = None;
    let mut fast = false;
    let mut boot_rom = None;
    let mut trace_serial = true;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                let n = args.next().context("--frames needs a value")?;
                frames = Some(n.parse().with_context(|| format!("invalid frame count '{n}'"))?);
            }
            "--fast" => fast = true,
            "--boot-rom" => {
                boot_rom = Some(PathBuf::from(
                    args.next().context("--boot-rom needs a path")?,
                ));
            }
            "--quiet-serial" => trace_serial = false,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("unknown option '{other}'\n{USAGE}"),
            other => {
                if rom.is_some() {
                    bail!("more than one ROM path given\n{USAGE}");
                }
                rom = Some(PathBuf::from(other));
            }
        }
    }

    let Some(rom) = rom else {
        bail!("no ROM path given\n{USAGE}");
    };
    Ok(Args {
        rom,
        frames,
        fast,
        boot_rom,
        trace_serial,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    log::info!("Playing ROM path: '{}'", args.rom.display());
    let cartridge = Cartridge::load(&args.rom)?;

    let config = match &args.boot_rom {
        Some(path) => {
            let image = std::fs::read(path)
                .with_context(|| format!("failed to read boot ROM '{}'", path.display()))?;
            ensure!(
                image.len() == BOOT_ROM_SIZE,
                "boot ROM must be {} bytes, got {}",
                BOOT_ROM_SIZE,
                image.len()
            );
            GameBoyConfig::builder()
                .boot_rom(image)
                .trace_serial(args.trace_serial)
                .build()
        }
        None => GameBoyConfig::builder()
            .trace_serial(args.trace_serial)
            .build(),
    };

    let mut app = GameBoyApp::new(GameBoy::with_cartridge(config, &cartridge));
    let title = format!("{} - {}", app.title(), cartridge.header().title);
    let info = HostInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .title(title)
        .frame_limit(args.frames)
        .paced(!args.fast)
        .build();

    let mut stdout = std::io::stdout();
    let frames = lcdboy::run(info, &mut app, |app, _screen| {
        let serial = app.gb.take_serial_output();
        lcdboy::surface_serial(&mut stdout, &serial);
    })?;

    if let Some(fault) = app.gb.fault() {
        bail!(
            "stopped after {} frames on unused opcode 0x{:02X} at 0x{:04X}",
            frames,
            fault.opcode,
            fault.address
        );
    }
    log::info!("ran {} frames", frames);
    Ok(())
}
