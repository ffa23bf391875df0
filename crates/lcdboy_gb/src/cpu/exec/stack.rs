use crate::cpu::regs::R16;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, reg: R16) {
        let value = self.regs.get16(reg);
        self.push_u16(bus, value);
    }

    /// POP AF drops the low nibble of F through `set16`.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, reg: R16) {
        let value = self.pop_u16(bus);
        self.regs.set16(reg, value);
    }
}
