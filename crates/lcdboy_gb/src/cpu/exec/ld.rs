use crate::cpu::regs::{R16, R8};
use crate::cpu::table::Indirect;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld_r8_r8<B: Bus>(&mut self, bus: &mut B, dst: R8, src: R8) {
        let value = self.read_r8(bus, src);
        self.write_r8(bus, dst, value);
    }

    pub(super) fn exec_ld_r8_imm<B: Bus>(&mut self, bus: &mut B, dst: R8) {
        let value = self.imm8();
        self.write_r8(bus, dst, value);
    }

    pub(super) fn exec_ld_r16_imm(&mut self, dst: R16) {
        let value = self.imm16();
        self.regs.set16(dst, value);
    }

    /// Resolve a (BC)/(DE)/(HL+)/(HL-) operand, applying the HL post
    /// increment/decrement.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a());
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    /// LD (a16),SP: low byte at a16, high byte at a16+1.
    pub(super) fn exec_ld_addr_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.imm16();
        bus.write16(addr, self.regs.sp);
    }

    pub(super) fn exec_ld_addr_a<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.imm16();
        bus.write8(addr, self.regs.a());
    }

    pub(super) fn exec_ld_a_addr<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.imm16();
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ldh_imm_a<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.imm8() as u16;
        bus.write8(addr, self.regs.a());
    }

    pub(super) fn exec_ldh_a_imm<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.imm8() as u16;
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ldh_c_a<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.regs.get8(R8::C) as u16;
        bus.write8(addr, self.regs.a());
    }

    pub(super) fn exec_ldh_a_c<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.regs.get8(R8::C) as u16;
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ld_hl_sp_offset(&mut self) {
        let result = self.alu_add16_signed(self.regs.sp, self.offset8());
        self.regs.set_hl(result);
    }
}
