mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::table::Op;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one decoded instruction.
    ///
    /// The program counter already points past the instruction, the operand
    /// latch holds its immediate and the wait counter holds the base cost.
    /// Handlers may move the program counter or raise the wait counter for a
    /// taken branch.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Nop => {}
            Op::Stop => self.exec_stop(bus),
            Op::Halt => self.exec_halt(),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),
            Op::Prefix => self.prefixed = true,

            Op::LdR8R8(dst, src) => self.exec_ld_r8_r8(bus, dst, src),
            Op::LdR8Imm(dst) => self.exec_ld_r8_imm(bus, dst),
            Op::LdR16Imm(dst) => self.exec_ld_r16_imm(dst),
            Op::LdIndA(ind) => self.exec_ld_indirect_a(bus, ind),
            Op::LdAInd(ind) => self.exec_ld_a_indirect(bus, ind),
            Op::LdAddrSp => self.exec_ld_addr_sp(bus),
            Op::LdAddrA => self.exec_ld_addr_a(bus),
            Op::LdAAddr => self.exec_ld_a_addr(bus),
            Op::LdhImmA => self.exec_ldh_imm_a(bus),
            Op::LdhAImm => self.exec_ldh_a_imm(bus),
            Op::LdhCA => self.exec_ldh_c_a(bus),
            Op::LdhAC => self.exec_ldh_a_c(bus),
            Op::LdSpHl => self.regs.sp = self.regs.hl(),
            Op::LdHlSpOffset => self.exec_ld_hl_sp_offset(),

            Op::Inc16(rr) => self.exec_inc16(rr),
            Op::Dec16(rr) => self.exec_dec16(rr),
            Op::AddHl(rr) => {
                let value = self.regs.get16(rr);
                self.alu_add16_hl(value);
            }
            Op::AddSpOffset => self.exec_add_sp_offset(),
            Op::Inc8(r) => self.exec_inc8(bus, r),
            Op::Dec8(r) => self.exec_dec8(bus, r),
            Op::Alu(alu, src) => {
                let value = self.read_r8(bus, src);
                self.exec_alu(alu, value);
            }
            Op::AluImm(alu) => {
                let value = self.imm8();
                self.exec_alu(alu, value);
            }

            Op::Rlca | Op::Rrca | Op::Rla | Op::Rra => self.exec_rotate_a(op),
            Op::Daa => self.alu_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Jr => self.jr(),
            Op::JrCond(cond) => self.jr_cond(self.condition(cond)),
            Op::Jp => self.jp(true),
            Op::JpCond(cond) => self.jp(self.condition(cond)),
            Op::JpHl => self.regs.pc = self.regs.hl(),
            Op::Call => self.call(bus, true),
            Op::CallCond(cond) => self.call(bus, self.condition(cond)),
            Op::Ret => self.ret(bus),
            Op::RetCond(cond) => self.ret_cond(bus, self.condition(cond)),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),
            Op::Push(rr) => self.exec_push(bus, rr),
            Op::Pop(rr) => self.exec_pop(bus, rr),

            Op::Rot(rot, r) => self.exec_cb_rot(bus, rot, r),
            Op::Bit(bit, r) => {
                let value = self.read_r8(bus, r);
                self.alu_bit(bit, value);
            }
            Op::Res(bit, r) => self.exec_cb_res(bus, bit, r),
            Op::Set(bit, r) => self.exec_cb_set(bus, bit, r),
        }
    }
}
