use crate::cpu::table::Cond;
use crate::cpu::{Bus, Cpu, Flags};

/// Extra cycles when a conditional relative jump is taken.
const JR_TAKEN_EXTRA: u32 = 4;
const JP_TAKEN_CYCLES: u32 = 16;
const CALL_TAKEN_CYCLES: u32 = 24;
const RET_TAKEN_CYCLES: u32 = 20;

impl Cpu {
    #[inline]
    pub(super) fn condition(&self, cond: Cond) -> bool {
        match cond {
            Cond::NZ => !self.get_flag(Flags::Z),
            Cond::Z => self.get_flag(Flags::Z),
            Cond::NC => !self.get_flag(Flags::C),
            Cond::C => self.get_flag(Flags::C),
        }
    }

    /// JR: the displacement is relative to the address after the
    /// instruction, which is where PC already points.
    pub(super) fn jr(&mut self) {
        let offset = self.offset8() as i16 as u16;
        self.regs.pc = self.regs.pc.wrapping_add(offset);
    }

    pub(super) fn jr_cond(&mut self, taken: bool) {
        if taken {
            self.jr();
            self.wait_cycles += JR_TAKEN_EXTRA;
        }
    }

    pub(super) fn jp(&mut self, taken: bool) {
        if !taken {
            return;
        }
        self.regs.pc = self.imm16();
        self.wait_cycles = JP_TAKEN_CYCLES;
    }

    /// CALL: push the return address (PC already advanced past the call)
    /// and jump.
    pub(super) fn call<B: Bus>(&mut self, bus: &mut B, taken: bool) {
        if !taken {
            return;
        }
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = self.imm16();
        self.wait_cycles = CALL_TAKEN_CYCLES;
    }

    pub(super) fn ret<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
    }

    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, taken: bool) {
        if !taken {
            return;
        }
        self.ret(bus);
        self.wait_cycles = RET_TAKEN_CYCLES;
    }

    /// RETI enables IME immediately, without the EI delay.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.ret(bus);
        self.ime = true;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = vector as u16;
    }
}
