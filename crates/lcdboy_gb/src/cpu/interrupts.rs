use bitflags::bitflags;

use super::{Bus, Cpu};

/// Interrupt flag register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;
/// Extra cycles charged for the dispatch sequence.
pub const DISPATCH_CYCLES: u32 = 20;

bitflags! {
    /// Interrupt sources, in IF/IE bit order. Lower bits win.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Interrupt {
    /// Highest-priority source among the set bits.
    pub fn highest_priority(self) -> Option<Interrupt> {
        if self.is_empty() {
            return None;
        }
        let index = self.bits().trailing_zeros();
        Interrupt::from_bits(1 << index)
    }

    /// Jump vector for a single source (0x40, 0x48, 0x50, 0x58, 0x60).
    pub fn vector(self) -> u16 {
        0x0040 + (self.bits().trailing_zeros() as u16) * 8
    }
}

impl Cpu {
    /// Check IE & IF and dispatch the highest-priority pending interrupt.
    ///
    /// Any pending source wakes HALT/STOP even with IME clear; dispatch
    /// itself needs IME. Returns true when an interrupt was taken.
    pub(in crate::cpu) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> bool {
        let iflags = bus.read8(IF_ADDR);
        let ie = bus.read8(IE_ADDR);
        let pending = Interrupt::from_bits_truncate(iflags & ie);
        let Some(source) = pending.highest_priority() else {
            return false;
        };

        self.halted = false;
        self.stopped = false;

        if !self.ime {
            return false;
        }

        self.ime = false;
        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        bus.write8(IF_ADDR, iflags & !source.bits());
        self.regs.pc = source.vector();
        self.wait_cycles += DISPATCH_CYCLES;

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
            source,
            self.regs.pc,
            pc,
            self.regs.sp,
            iflags & 0x1F,
            ie,
        );
        true
    }
}
