use crate::config::GameBoyConfig;
use crate::cpu::{Bus, Cpu, DecodeFault};

use super::cartridge::Cartridge;
use super::ppu::Ppu;
use super::{GameBoyBus, CYCLES_PER_FRAME};

/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus. This is the main entry point used by the
/// `GameBoyApp` wrapper and the tools.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    config: GameBoyConfig,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new(GameBoyConfig::default())
    }
}

impl GameBoy {
    /// Power on with an empty cartridge slot.
    pub fn new(config: GameBoyConfig) -> Self {
        let cpu = if config.boot_rom.is_some() {
            Cpu::new_for_boot_rom()
        } else {
            Cpu::new()
        };
        Self {
            cpu,
            bus: GameBoyBus::new(&config),
            config,
        }
    }

    pub fn with_cartridge(config: GameBoyConfig, cartridge: &Cartridge) -> Self {
        let mut gb = Self::new(config);
        gb.load_cartridge(cartridge);
        gb
    }

    /// Map a cartridge's ROM window into the address space.
    pub fn load_cartridge(&mut self, cartridge: &Cartridge) {
        self.bus.load_cartridge(cartridge);
    }

    /// Power-cycle CPU and peripherals. The ROM region survives.
    pub fn reset(&mut self) {
        let rom = self.bus.memory.slice(0x0000..0x8000).to_vec();
        *self = Self::new(self.config.clone());
        self.bus.memory.load(0x0000, &rom);
    }

    /// Advance one cycle. Returns true when an instruction executed.
    pub fn step(&mut self) -> bool {
        self.cpu.step(&mut self.bus)
    }

    /// Run one instruction to completion. Returns the cycles consumed.
    pub fn step_instruction(&mut self) -> u32 {
        self.cpu.step_instruction(&mut self.bus)
    }

    /// Run one frame worth of cycles (70224), stopping early on a decode
    /// fault. Returns the cycles stepped.
    pub fn step_frame(&mut self) -> u32 {
        let mut cycles = 0;
        while cycles < CYCLES_PER_FRAME {
            self.cpu.step(&mut self.bus);
            cycles += 1;
            if self.cpu.is_faulted() {
                break;
            }
        }
        cycles
    }

    /// 144 rows of 160 color indices (0–3).
    pub fn framebuffer(&self) -> &[u8] {
        self.bus.ppu.framebuffer()
    }

    pub fn ppu(&self) -> &Ppu {
        &self.bus.ppu
    }

    /// Bytes sent over the serial side channel since the last call. Hosts
    /// should drain this regularly; undrained output is capped and the
    /// oldest bytes are dropped.
    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.serial.take_output()
    }

    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }

    /// Read through the address space, with register overrides applied.
    pub fn read8(&mut self, addr: u16) -> u8 {
        self.bus.read8(addr)
    }

    /// Write through the address space, with register side effects.
    pub fn write8(&mut self, addr: u16, value: u8) {
        self.bus.write8(addr, value)
    }

    pub fn fault(&self) -> Option<DecodeFault> {
        self.cpu.fault()
    }

    pub fn boot_rom_mapped(&self) -> bool {
        self.bus.boot_rom_mapped()
    }

    /// Raw memory image without read overrides (used by debug views).
    pub fn memory(&self) -> &super::Memory {
        &self.bus.memory
    }
}
