use crate::machine::io;

use super::GameBoyBus;

impl GameBoyBus {
    /// Initialize I/O registers to the DMG post-boot state.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        // Joypad is not modelled; nothing is ever pressed.
        self.memory[io::P1] = 0xFF;

        // Serial.
        self.memory[io::SB] = 0x00;
        self.memory[io::SC] = 0x7E;

        // Divider / timer.
        self.memory[io::TIMA] = 0x00;
        self.memory[io::TMA] = 0x00;
        self.write8_mmio(io::TAC, 0x00);

        self.memory[io::IF] = 0x00;
        self.memory[io::IE] = 0x00;

        // PPU registers. STAT bit 7 is unused and reads as 1; LCDC goes
        // through the write path so the display starts its first line.
        self.memory[io::STAT] = 0x80;
        self.memory[io::SCY] = 0x00;
        self.memory[io::SCX] = 0x00;
        self.memory[io::LYC] = 0x00;
        self.memory[io::BGP] = 0xFC;
        self.memory[io::OBP0] = 0xFF;
        self.memory[io::OBP1] = 0xFF;
        self.memory[io::WY] = 0x00;
        self.memory[io::WX] = 0x00;
        self.write8_mmio(io::LCDC, 0x91);
    }
}
