use crate::cpu::Interrupt;
use crate::machine::memory::Memory;

use super::{
    LcdStatus, Ppu, PpuMode, LINES_PER_FRAME, LINE_CYCLES, OAM_SEARCH_END, PIXEL_TRANSFER_END,
    VBLANK_START_LINE,
};

impl Ppu {
    /// Advance the display by one CPU cycle.
    ///
    /// Transitions happen at fixed cumulative line-cycle counts (80, 252,
    /// 456). The scanline is rendered at the transfer to h-blank boundary.
    pub(crate) fn tick(&mut self, memory: &mut Memory) {
        if !self.lcd_enabled() {
            return;
        }

        self.line_cycles += 1;

        match self.mode {
            PpuMode::OamSearch => {
                if self.line_cycles >= OAM_SEARCH_END {
                    self.set_mode(PpuMode::PixelTransfer, memory);
                }
            }
            PpuMode::PixelTransfer => {
                if self.line_cycles >= PIXEL_TRANSFER_END {
                    self.render_line(memory);
                    self.set_mode(PpuMode::HBlank, memory);
                    if Self::stat_enabled(memory, LcdStatus::HBLANK_INTERRUPT) {
                        memory.request_interrupt(Interrupt::LCD_STAT);
                    }
                }
            }
            PpuMode::HBlank => {
                if self.line_cycles >= LINE_CYCLES {
                    self.line_cycles = 0;
                    self.ly += 1;
                    self.compare_lyc(memory);
                    if self.ly == VBLANK_START_LINE {
                        self.enter_vblank(memory);
                    } else {
                        self.enter_oam_search(memory);
                    }
                }
            }
            PpuMode::VBlank => {
                if self.line_cycles >= LINE_CYCLES {
                    self.line_cycles = 0;
                    self.ly += 1;
                    if self.ly == LINES_PER_FRAME {
                        self.ly = 0;
                        self.compare_lyc(memory);
                        self.enter_oam_search(memory);
                    } else {
                        self.compare_lyc(memory);
                    }
                }
            }
        }
    }

    fn enter_oam_search(&mut self, memory: &mut Memory) {
        self.set_mode(PpuMode::OamSearch, memory);
        if Self::stat_enabled(memory, LcdStatus::OAM_INTERRUPT) {
            memory.request_interrupt(Interrupt::LCD_STAT);
        }
    }

    fn enter_vblank(&mut self, memory: &mut Memory) {
        self.set_mode(PpuMode::VBlank, memory);
        self.window_line = 0;
        self.frame_count = self.frame_count.wrapping_add(1);
        memory.request_interrupt(Interrupt::VBLANK);
        if Self::stat_enabled(memory, LcdStatus::VBLANK_INTERRUPT) {
            memory.request_interrupt(Interrupt::LCD_STAT);
        }
        log::debug!(
            "GB PPU: VBlank edge frame={} IF=0x{:02X}",
            self.frame_count,
            memory[crate::machine::io::IF]
        );
    }
}
