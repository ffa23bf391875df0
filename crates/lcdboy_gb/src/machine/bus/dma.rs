use crate::machine::io;

use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        // OAM DMA: copy 160 bytes from XX00..XX9F to FE00..FE9F. The
        // transfer is immediate; bus conflicts are not modelled.
        let base = (value as u16) << 8;
        for i in 0..io::OAM_SIZE {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.memory[io::OAM_START + i] = byte;
        }
        self.memory[io::DMA] = value;
        log::debug!("GB DMA: 0x{:04X} -> OAM", base);
    }
}
