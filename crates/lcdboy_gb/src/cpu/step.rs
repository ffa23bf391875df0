use log::Level;

use super::table;
use super::{Bus, Cpu, DecodeFault};

/// Wait applied while parked in HALT/STOP.
const HALT_IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Advance the machine by exactly one cycle.
    ///
    /// Peripherals always advance. Interrupts are checked every cycle so a
    /// halted CPU wakes mid-wait. A new instruction is fetched and executed
    /// only once the wait counter of the previous one runs out. Returns true
    /// when an instruction was executed on this cycle.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> bool {
        bus.tick(1);
        self.cycles = self.cycles.wrapping_add(1);

        if self.fault.is_some() {
            return false;
        }

        self.handle_interrupts(bus);

        self.wait_cycles = self.wait_cycles.saturating_sub(1);
        if self.wait_cycles > 0 {
            return false;
        }

        if self.halted || self.stopped {
            self.wait_cycles = HALT_IDLE_CYCLES;
            return false;
        }

        self.fetch_and_execute(bus)
    }

    /// Step until one instruction has executed and its wait has elapsed.
    /// Returns the number of cycles consumed. Gives up after one frame's
    /// worth of cycles when halted without a wake source, or when faulted.
    pub fn step_instruction<B: Bus>(&mut self, bus: &mut B) -> u32 {
        const LIMIT: u32 = 70_224;
        let mut cycles = 0;
        while cycles < LIMIT && self.fault.is_none() {
            cycles += 1;
            if self.step(bus) {
                break;
            }
        }
        while self.wait_cycles > 1 && self.fault.is_none() {
            self.step(bus);
            cycles += 1;
        }
        cycles
    }

    fn fetch_and_execute<B: Bus>(&mut self, bus: &mut B) -> bool {
        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        let desc = table::primary(opcode);
        let Some(op) = desc.op else {
            self.raise_decode_fault(opcode, pc);
            return false;
        };

        self.operand = match desc.length {
            2 => bus.read8(pc.wrapping_add(1)) as u16,
            3 => bus.read16(pc.wrapping_add(1)),
            _ => 0,
        };

        if log::log_enabled!(Level::Trace) {
            log::trace!(
                "{:04X}: {:02X} {:<16} A={:02X} F={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
                pc,
                opcode,
                desc.disassemble(self.operand),
                self.regs.a(),
                self.regs.f(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
                self.regs.sp,
            );
        }

        self.regs.pc = pc.wrapping_add(desc.length as u16);
        self.wait_cycles = desc.cycles;
        self.execute(bus, op);

        if self.prefixed {
            self.prefixed = false;
            let cb_pc = self.regs.pc;
            let cb = bus.read8(cb_pc);
            let ext = table::extended(cb);
            self.regs.pc = cb_pc.wrapping_add(1);
            self.wait_cycles += ext.cycles;
            if let Some(op) = ext.op {
                if log::log_enabled!(Level::Trace) {
                    log::trace!("{:04X}: CB {:02X} {}", cb_pc, cb, ext);
                }
                self.execute(bus, op);
            }
        }

        self.instructions = self.instructions.wrapping_add(1);
        self.apply_ime_delay();
        true
    }

    fn raise_decode_fault(&mut self, opcode: u8, address: u16) {
        log::error!(
            "GB CPU: unused opcode 0x{:02X} at 0x{:04X}; halting (AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X})",
            opcode,
            address,
            self.regs.af(),
            self.regs.bc(),
            self.regs.de(),
            self.regs.hl(),
            self.regs.sp,
        );
        self.fault = Some(DecodeFault { opcode, address });
        self.halted = true;
    }
}
