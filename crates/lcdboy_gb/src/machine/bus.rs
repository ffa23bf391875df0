use crate::config::GameBoyConfig;

use super::cartridge::Cartridge;
use super::memory::Memory;
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;

mod dma;
mod init;
mod mmio;
mod traits;

/// Size of the DMG boot ROM overlay at 0x0000.
pub const BOOT_ROM_SIZE: usize = 0x100;

/// Address space of the machine: the flat memory image plus the
/// peripherals whose registers it intercepts.
pub(crate) struct GameBoyBus {
    pub(crate) memory: Memory,
    pub(crate) ppu: Ppu,
    pub(crate) timer: Timer,
    pub(crate) serial: Serial,
    boot_rom: Option<Box<[u8]>>,
    boot_rom_mapped: bool,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        Self::new(&GameBoyConfig::default())
    }
}

impl GameBoyBus {
    pub(crate) fn new(config: &GameBoyConfig) -> Self {
        let boot_rom = config
            .boot_rom
            .as_ref()
            .map(|image| image.clone().into_boxed_slice());
        let boot_rom_mapped = boot_rom.is_some();
        let mut bus = Self {
            memory: Memory::new(),
            ppu: Ppu::new(),
            timer: Timer::new(),
            serial: Serial::new(config.trace_serial),
            boot_rom,
            boot_rom_mapped,
        };
        bus.apply_dmg_initial_io_state();
        bus
    }

    /// Map the cartridge's fixed ROM window into 0x0000–0x7FFF. This is the
    /// only path that writes the ROM region.
    pub(crate) fn load_cartridge(&mut self, cartridge: &Cartridge) {
        self.memory.load(0x0000, cartridge.rom_window());
    }

    pub(crate) fn boot_rom_mapped(&self) -> bool {
        self.boot_rom_mapped
    }
}
