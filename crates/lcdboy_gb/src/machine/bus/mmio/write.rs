use crate::machine::io;
use crate::machine::ppu::LcdStatus;

use super::super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn write8_mmio_impl(&mut self, addr: u16, value: u8) {
        match addr {
            // Cartridge ROM is read-only and bank switching is not
            // modelled, so CPU writes have no effect.
            0x0000..=0x7FFF => {}

            // Echo RAM writes land in the mirrored work RAM.
            0xE000..=0xFDFF => self.memory[addr - 0x2000] = value,

            // Writes to the unusable area 0xFEA0..0xFEFF are ignored.
            0xFEA0..=0xFEFF => {}

            io::SC => {
                let sb = self.memory[io::SB];
                self.memory[io::SC] = self.serial.write_sc(value, sb);
            }

            // DIV cannot be set; any write clears the divider.
            io::DIV => {
                self.timer.reset_divider();
                self.memory[io::DIV] = 0;
            }

            io::TAC => {
                self.timer.write_tac(value);
                self.memory[io::TAC] = value;
            }

            io::LCDC => {
                self.memory[io::LCDC] = value;
                self.ppu.set_control(value, &mut self.memory);
            }

            // Only the interrupt-select bits are writable.
            io::STAT => {
                let current = self.memory[io::STAT];
                self.memory[io::STAT] =
                    (current & !LcdStatus::WRITABLE) | (value & LcdStatus::WRITABLE);
            }

            // LY is read-only.
            io::LY => {}

            io::DMA => self.do_oam_dma(value),

            io::BOOT => {
                if value != 0 && self.boot_rom_mapped {
                    self.boot_rom_mapped = false;
                    log::debug!("GB: boot ROM unmapped");
                }
                self.memory[io::BOOT] = value;
            }

            _ => self.memory[addr] = value,
        }
    }
}
