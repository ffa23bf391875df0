use crate::cpu::table::{AluOp, Op};
use crate::cpu::{Cpu, Flags};

impl Cpu {
    pub(super) fn exec_alu(&mut self, alu: AluOp, value: u8) {
        match alu {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.alu_sub(value, false),
            AluOp::Sbc => self.alu_sub(value, true),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            AluOp::Cp => self.alu_cp(value),
        }
    }

    /// RLCA/RRCA/RLA/RRA. Same as the CB forms except Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, op: Op) {
        let a = self.regs.a();
        let result = match op {
            Op::Rlca => self.alu_rlc(a),
            Op::Rrca => self.alu_rrc(a),
            Op::Rla => self.alu_rl(a),
            Op::Rra => self.alu_rr(a),
            _ => return,
        };
        self.regs.set_a(result);
        self.set_flag(Flags::Z, false);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.set_a(!self.regs.a());
        self.set_flag(Flags::N, true);
        self.set_flag(Flags::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, false);
        self.set_flag(Flags::C, true);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flags::C);
        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, false);
        self.set_flag(Flags::C, !carry);
    }
}
