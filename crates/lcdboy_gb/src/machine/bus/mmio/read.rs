use crate::machine::io;

use super::super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn read8_mmio_impl(&mut self, addr: u16) -> u8 {
        match addr {
            // Boot ROM overlay until FF50 is written.
            0x0000..=0x00FF if self.boot_rom_mapped => self
                .boot_rom
                .as_ref()
                .and_then(|image| image.get(addr as usize).copied())
                .unwrap_or(0xFF),

            // Echo RAM: 0xE000..0xFDFF mirrors 0xC000..0xDDFF.
            0xE000..=0xFDFF => self.memory[addr - 0x2000],

            // Unusable area.
            0xFEA0..=0xFEFF => 0xFF,

            // No buttons are ever pressed.
            io::P1 => 0xFF,

            // Live scanline from the display.
            io::LY => self.ppu.ly(),

            _ => self.memory[addr],
        }
    }
}
