//! Display timer: LCD mode state machine and scanline renderer.
//!
//! The PPU owns its timing state and the framebuffer. Register bytes (STAT,
//! SCX/SCY, WX/WY, LYC, IF) live in the memory image and are read and
//! updated through it; LCDC is decoded once per write into `control`.

mod lcdc;
mod render;
mod timing;

pub use lcdc::{LcdControl, LcdStatus};
pub use render::{tile_pixel, SpriteAttributes};

use crate::cpu::Interrupt;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::io;
use super::memory::Memory;

/// Cumulative line-cycle boundaries of the visible-line modes.
pub const OAM_SEARCH_END: u32 = 80;
pub const PIXEL_TRANSFER_END: u32 = 252;
pub const LINE_CYCLES: u32 = 456;
pub const VBLANK_START_LINE: u8 = 144;
pub const LINES_PER_FRAME: u8 = 154;

/// LCD mode as reported in STAT bits 0–1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PpuMode {
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    PixelTransfer = 3,
}

impl PpuMode {
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }
}

#[derive(Clone)]
pub struct Ppu {
    mode: PpuMode,
    /// Cycles into the current line (0–455).
    line_cycles: u32,
    ly: u8,
    /// Internal window line counter; advances only on lines that drew the
    /// window.
    window_line: u8,
    control: LcdControl,
    /// One 2-bit color index per pixel, row-major.
    framebuffer: Box<[u8]>,
    frame_count: u64,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// A PPU with the LCD off. The bus enables it by writing LCDC.
    pub fn new() -> Self {
        Self {
            mode: PpuMode::HBlank,
            line_cycles: 0,
            ly: 0,
            window_line: 0,
            control: LcdControl::empty(),
            framebuffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT].into_boxed_slice(),
            frame_count: 0,
        }
    }

    pub fn mode(&self) -> PpuMode {
        self.mode
    }

    pub fn ly(&self) -> u8 {
        self.ly
    }

    pub fn line_cycles(&self) -> u32 {
        self.line_cycles
    }

    pub fn control(&self) -> LcdControl {
        self.control
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    pub fn lcd_enabled(&self) -> bool {
        self.control.contains(LcdControl::LCD_ENABLE)
    }

    /// Apply an LCDC write. Turning the LCD off parks the PPU at line 0 in
    /// h-blank; turning it on restarts OAM search at line 0.
    pub(crate) fn set_control(&mut self, value: u8, memory: &mut Memory) {
        let was_enabled = self.lcd_enabled();
        self.control = LcdControl::from_bits_retain(value);
        let now_enabled = self.lcd_enabled();

        if was_enabled && !now_enabled {
            log::debug!("GB PPU: LCD off (LY was {})", self.ly);
            self.ly = 0;
            self.line_cycles = 0;
            self.window_line = 0;
            self.set_mode(PpuMode::HBlank, memory);
        } else if !was_enabled && now_enabled {
            log::debug!("GB PPU: LCD on (LCDC=0x{:02X})", value);
            self.ly = 0;
            self.line_cycles = 0;
            self.window_line = 0;
            self.set_mode(PpuMode::OamSearch, memory);
        }
        self.update_coincidence(memory);
    }

    fn set_mode(&mut self, mode: PpuMode, memory: &mut Memory) {
        self.mode = mode;
        let stat = memory[io::STAT];
        memory[io::STAT] = (stat & !0x03) | mode.bits();
    }

    #[inline]
    fn stat_enabled(memory: &Memory, source: LcdStatus) -> bool {
        LcdStatus::from_bits_truncate(memory[io::STAT]).contains(source)
    }

    /// Refresh the coincidence bit. Returns true when LY == LYC.
    fn update_coincidence(&self, memory: &mut Memory) -> bool {
        let matched = self.ly == memory[io::LYC];
        let stat = memory[io::STAT];
        memory[io::STAT] = if matched {
            stat | LcdStatus::COINCIDENCE.bits()
        } else {
            stat & !LcdStatus::COINCIDENCE.bits()
        };
        matched
    }

    /// Called after every LY change. A match always raises LCD-status.
    fn compare_lyc(&self, memory: &mut Memory) {
        if self.update_coincidence(memory) {
            memory.request_interrupt(Interrupt::LCD_STAT);
        }
    }
}
