use crate::cpu::Bus;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    fn tick(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.timer.tick(&mut self.memory);
            self.ppu.tick(&mut self.memory);
        }
    }
}
