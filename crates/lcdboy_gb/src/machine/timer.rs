use crate::cpu::Interrupt;

use super::io;
use super::memory::Memory;

/// TIMA increment periods in CPU cycles, indexed by TAC[1:0].
const PERIODS: [u32; 4] = [1024, 16, 64, 256];

/// Divider and TIMA unit.
///
/// DIV exposes the high byte of a free-running 16-bit counter. TIMA counts
/// at the period selected by TAC and reloads from TMA on overflow, raising
/// the timer interrupt. The register bytes live in the memory image; only
/// the hidden counters and the decoded TAC live here.
#[derive(Clone, Debug)]
pub(crate) struct Timer {
    divider: u16,
    counter: u32,
    period: u32,
    enabled: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            divider: 0,
            counter: 0,
            period: PERIODS[0],
            enabled: false,
        }
    }

    /// Advance by one CPU cycle.
    pub(super) fn tick(&mut self, memory: &mut Memory) {
        self.divider = self.divider.wrapping_add(1);
        memory[io::DIV] = (self.divider >> 8) as u8;

        if !self.enabled {
            return;
        }

        self.counter += 1;
        if self.counter < self.period {
            return;
        }
        self.counter = 0;

        let (tima, overflow) = memory[io::TIMA].overflowing_add(1);
        if overflow {
            memory[io::TIMA] = memory[io::TMA];
            memory.request_interrupt(Interrupt::TIMER);
        } else {
            memory[io::TIMA] = tima;
        }
    }

    /// Any DIV write clears the whole divider counter.
    pub(super) fn reset_divider(&mut self) {
        self.divider = 0;
    }

    /// Decode TAC into the cached period and enable flag.
    pub(super) fn write_tac(&mut self, value: u8) {
        self.period = PERIODS[(value & 0x03) as usize];
        self.enabled = value & 0x04 != 0;
        log::debug!(
            "GB timer: TAC=0x{:02X} enabled={} period={}",
            value,
            self.enabled,
            self.period
        );
    }

    #[cfg(test)]
    pub(crate) fn divider(&self) -> u16 {
        self.divider
    }

    #[cfg(test)]
    pub(crate) fn period(&self) -> u32 {
        self.period
    }

    #[cfg(test)]
    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_is_high_byte_of_divider() {
        let mut timer = Timer::new();
        let mut memory = Memory::new();
        for _ in 0..255 {
            timer.tick(&mut memory);
        }
        assert_eq!(memory[io::DIV], 0);
        timer.tick(&mut memory);
        assert_eq!(memory[io::DIV], 1);
        assert_eq!(timer.divider(), 256);
    }

    #[test]
    fn tac_selects_period() {
        let mut timer = Timer::new();
        for (tac, period) in [(0x04, 1024), (0x05, 16), (0x06, 64), (0x07, 256)] {
            timer.write_tac(tac);
            assert!(timer.enabled());
            assert_eq!(timer.period(), period);
        }
        timer.write_tac(0x01);
        assert!(!timer.enabled());
    }

    #[test]
    fn tima_overflow_reloads_and_requests_interrupt() {
        let mut timer = Timer::new();
        let mut memory = Memory::new();
        timer.write_tac(0x05);
        memory[io::TIMA] = 0xFF;
        memory[io::TMA] = 0xAB;

        for _ in 0..15 {
            timer.tick(&mut memory);
        }
        assert_eq!(memory[io::TIMA], 0xFF);
        assert_eq!(memory[io::IF], 0);

        timer.tick(&mut memory);
        assert_eq!(memory[io::TIMA], 0xAB);
        assert_eq!(memory[io::IF], Interrupt::TIMER.bits());

        for _ in 0..16 {
            timer.tick(&mut memory);
        }
        assert_eq!(memory[io::TIMA], 0xAC);
    }

    #[test]
    fn disabled_timer_leaves_tima_alone() {
        let mut timer = Timer::new();
        let mut memory = Memory::new();
        timer.write_tac(0x01);
        for _ in 0..4096 {
            timer.tick(&mut memory);
        }
        assert_eq!(memory[io::TIMA], 0);
        assert_eq!(memory[io::DIV], 16);
    }
}
