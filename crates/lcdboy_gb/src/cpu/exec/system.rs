use crate::cpu::{Bus, Cpu};

const DIV_ADDR: u16 = 0xFF04;

impl Cpu {
    /// STOP. The padding byte was consumed as the operand. Enter the
    /// low-power state and reset the divider; a pending enabled interrupt
    /// wakes the CPU since the joypad is not modelled.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        bus.write8(DIV_ADDR, 0);
        self.stopped = true;
        self.halted = false;
    }

    pub(super) fn exec_halt(&mut self) {
        self.halted = true;
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    pub(super) fn exec_ei(&mut self) {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
    }

    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // First boundary after EI: arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
