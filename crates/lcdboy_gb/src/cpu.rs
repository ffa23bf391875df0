mod alu;
mod cb;
mod exec;
mod interrupts;
mod regs;
mod step;
pub mod table;

pub use interrupts::{Interrupt, DISPATCH_CYCLES, IE_ADDR, IF_ADDR};
pub use regs::{Flags, RegisterPair, Registers, R16, R8};
pub use table::{Descriptor, Op};

/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU performs every memory access through this trait and drives the
/// rest of the machine forward with `tick`, one call per emulated cycle.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance bus-side peripherals (display, timer) by `cycles` CPU cycles.
    ///
    /// Default implementation does nothing so that flat test buses do not
    /// need to care about peripherals.
    fn tick(&mut self, _cycles: u32) {}

    /// Little-endian 16-bit read.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr) as u16;
        let hi = self.read8(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Little-endian 16-bit write (low byte first).
    fn write16(&mut self, addr: u16, value: u16) {
        self.write8(addr, value as u8);
        self.write8(addr.wrapping_add(1), (value >> 8) as u8);
    }
}

/// An opcode slot with no handler was fetched.
///
/// On hardware these opcodes hard-lock the CPU; here the processor halts
/// permanently and only the peripherals keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeFault {
    pub opcode: u8,
    pub address: u16,
}

/// Game Boy CPU core (LR35902).
///
/// Execution is cycle-stepped: `step` advances the machine by exactly one
/// cycle. An instruction executes atomically on the cycle it is fetched and
/// the CPU then waits out its cycle cost before fetching again.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Global interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. Behaves like HALT in this model.
    pub stopped: bool,
    /// EI was executed; IME turns on once the following instruction is done.
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Set by the CB prefix handler; the next byte is decoded through the
    /// extended table.
    prefixed: bool,
    /// Operand of the instruction being executed (0 when it has none).
    operand: u16,
    /// Cycles left before the next fetch.
    wait_cycles: u32,
    cycles: u64,
    instructions: u64,
    fault: Option<DecodeFault>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the DMG boot ROM leaves behind at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            prefixed: false,
            operand: 0,
            wait_cycles: 0,
            cycles: 0,
            instructions: 0,
            fault: None,
        };
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// CPU that starts executing a boot ROM image at 0x0000.
    pub fn new_for_boot_rom() -> Self {
        let mut cpu = Self::new();
        cpu.regs.pc = 0x0000;
        cpu
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Register values after the DMG boot ROM hands control to the
    /// cartridge (Pan Docs "Power Up Sequence").
    fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        self.ime = false;
    }

    #[inline]
    pub fn get_flag(&self, flag: Flags) -> bool {
        self.regs.flags().contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.regs.flags();
        flags.set(flag, value);
        self.regs.set_flags(flags);
    }

    /// Total cycles stepped since power-on.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Number of instructions fetched and executed (CB-prefixed pairs count
    /// once).
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Remaining wait cycles of the in-flight instruction.
    pub fn wait_cycles(&self) -> u32 {
        self.wait_cycles
    }

    pub fn fault(&self) -> Option<DecodeFault> {
        self.fault
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// True when the next `step` will fetch a new instruction (assuming no
    /// interrupt is dispatched first).
    pub fn at_instruction_boundary(&self) -> bool {
        self.wait_cycles <= 1 && !self.halted && !self.stopped && self.fault.is_none()
    }

    #[inline]
    fn imm8(&self) -> u8 {
        self.operand as u8
    }

    #[inline]
    fn imm16(&self) -> u16 {
        self.operand
    }

    /// Operand reinterpreted as a signed displacement.
    #[inline]
    fn offset8(&self) -> i8 {
        self.operand as u8 as i8
    }

    /// Read an 8-bit register or (HL).
    #[inline]
    fn read_r8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u8 {
        match reg {
            R8::HlInd => bus.read8(self.regs.hl()),
            _ => self.regs.get8(reg),
        }
    }

    /// Write an 8-bit register or (HL).
    #[inline]
    fn write_r8<B: Bus>(&mut self, bus: &mut B, reg: R8, value: u8) {
        match reg {
            R8::HlInd => bus.write8(self.regs.hl(), value),
            _ => self.regs.set8(reg, value),
        }
    }

    #[inline]
    fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let lo = value as u8;
        let hi = (value >> 8) as u8;
        // Stack grows downward. We want memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}

#[cfg(test)]
mod tests;
