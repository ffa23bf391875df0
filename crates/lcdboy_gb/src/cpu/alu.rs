use super::{Cpu, Flags};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a();
        let carry_in = u8::from(use_carry && self.get_flag(Flags::C));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.set_a(result);

        let mut flags = Flags::empty();
        flags.set(Flags::Z, result == 0);
        flags.set(Flags::H, half & 0x10 != 0);
        flags.set(Flags::C, full > 0xFF);
        self.regs.set_flags(flags);
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a();
        let result = self.sub_flags(a, value, use_carry);
        self.regs.set_a(result);
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        let a = self.regs.a();
        self.sub_flags(a, value, false);
    }

    fn sub_flags(&mut self, a: u8, value: u8, use_carry: bool) -> u8 {
        let carry_in = i16::from(use_carry && self.get_flag(Flags::C));

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        let mut flags = Flags::N;
        flags.set(Flags::Z, result == 0);
        flags.set(Flags::H, half < 0);
        flags.set(Flags::C, full < 0);
        self.regs.set_flags(flags);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a() & value;
        self.regs.set_a(result);

        let mut flags = Flags::H;
        flags.set(Flags::Z, result == 0);
        self.regs.set_flags(flags);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a() | value;
        self.regs.set_a(result);
        self.set_zero_only(result);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a() ^ value;
        self.regs.set_a(result);
        self.set_zero_only(result);
    }

    #[inline]
    fn set_zero_only(&mut self, result: u8) {
        let mut flags = Flags::empty();
        flags.set(Flags::Z, result == 0);
        self.regs.set_flags(flags);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to compute a correction value. Updates A, Z, H, C
    /// and leaves N unchanged. On the subtract path only the previous
    /// carry/half-carry select the correction, so C keeps its old value.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a();
        let mut adjust: u8 = if self.get_flag(Flags::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flags::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flags::N) {
            if a & 0x0F > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flags::C, adjust >= 0x60);
        self.set_flag(Flags::H, false);
        self.set_flag(Flags::Z, a == 0);
        self.regs.set_a(a);
    }

    /// 8-bit increment helper used by INC r and INC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flags::Z, result == 0);
        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, (value & 0x0F) == 0x0F);
        result
    }

    /// 8-bit decrement helper used by DEC r and DEC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flags::Z, result == 0);
        self.set_flag(Flags::N, true);
        self.set_flag(Flags::H, (value & 0x0F) == 0);
        result
    }

    /// 16-bit add helper for `ADD HL,rr`.
    ///
    /// Z is unaffected; N is cleared; H and C come from bit 11 and bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flags::C, hl as u32 + value as u32 > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// Add a signed 8-bit displacement to a 16-bit base (ADD SP,r8 and
    /// LD HL,SP+r8).
    ///
    /// Z and N are cleared; H and C are computed from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, offset: i8) -> u16 {
        let offset = offset as i16 as u16;
        let mut flags = Flags::empty();
        flags.set(Flags::H, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        flags.set(Flags::C, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        self.regs.set_flags(flags);
        base.wrapping_add(offset)
    }

    /// Flags for every rotate and shift: Z from the result, C from the bit
    /// shifted out, N and H cleared.
    #[inline]
    fn shift_flags(&mut self, result: u8, carry: bool) {
        let mut flags = Flags::empty();
        flags.set(Flags::Z, result == 0);
        flags.set(Flags::C, carry);
        self.regs.set_flags(flags);
    }

    pub(super) fn alu_rlc(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(1);
        self.shift_flags(result, value & 0x80 != 0);
        result
    }

    pub(super) fn alu_rrc(&mut self, value: u8) -> u8 {
        let result = value.rotate_right(1);
        self.shift_flags(result, value & 0x01 != 0);
        result
    }

    /// Rotate left through carry.
    pub(super) fn alu_rl(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.get_flag(Flags::C));
        let result = (value << 1) | carry_in;
        self.shift_flags(result, value & 0x80 != 0);
        result
    }

    /// Rotate right through carry.
    pub(super) fn alu_rr(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.get_flag(Flags::C));
        let result = (value >> 1) | (carry_in << 7);
        self.shift_flags(result, value & 0x01 != 0);
        result
    }

    pub(super) fn alu_sla(&mut self, value: u8) -> u8 {
        let result = value << 1;
        self.shift_flags(result, value & 0x80 != 0);
        result
    }

    /// Arithmetic shift right; bit 7 is preserved.
    pub(super) fn alu_sra(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | (value & 0x80);
        self.shift_flags(result, value & 0x01 != 0);
        result
    }

    pub(super) fn alu_srl(&mut self, value: u8) -> u8 {
        let result = value >> 1;
        self.shift_flags(result, value & 0x01 != 0);
        result
    }

    pub(super) fn alu_swap(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(4);
        self.shift_flags(result, false);
        result
    }

    /// BIT b: Z is the inverse of the tested bit, C untouched.
    pub(super) fn alu_bit(&mut self, bit: u8, value: u8) {
        self.set_flag(Flags::Z, value & (1 << bit) == 0);
        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, true);
    }
}
