//! CB-prefixed instructions: rotates, shifts, SWAP and single-bit ops.

use super::regs::R8;
use super::table::RotOp;
use super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_cb_rot<B: Bus>(&mut self, bus: &mut B, rot: RotOp, reg: R8) {
        let value = self.read_r8(bus, reg);
        let result = match rot {
            RotOp::Rlc => self.alu_rlc(value),
            RotOp::Rrc => self.alu_rrc(value),
            RotOp::Rl => self.alu_rl(value),
            RotOp::Rr => self.alu_rr(value),
            RotOp::Sla => self.alu_sla(value),
            RotOp::Sra => self.alu_sra(value),
            RotOp::Swap => self.alu_swap(value),
            RotOp::Srl => self.alu_srl(value),
        };
        self.write_r8(bus, reg, result);
    }

    pub(super) fn exec_cb_res<B: Bus>(&mut self, bus: &mut B, bit: u8, reg: R8) {
        let value = self.read_r8(bus, reg) & !(1 << bit);
        self.write_r8(bus, reg, value);
    }

    pub(super) fn exec_cb_set<B: Bus>(&mut self, bus: &mut B, bit: u8, reg: R8) {
        let value = self.read_r8(bus, reg) | (1 << bit);
        self.write_r8(bus, reg, value);
    }
}
