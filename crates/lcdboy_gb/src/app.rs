use lcdboy_common::App;

use crate::machine::io;
use crate::machine::ppu::LcdControl;
use crate::{GameBoy, SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Host-facing wrapper for the Game Boy machine.
///
/// Implements the shared `App` trait so a host loop can drive the machine one
/// frame at a time. The screen buffer receives one 2-bit color index per
/// pixel.
#[derive(Default)]
pub struct GameBoyApp {
    should_exit: bool,
    pub gb: GameBoy,
    frame_counter: u64,
    last_pc: u16,
    pc_stagnant_frames: u32,
    lcdc_off_frames: u32,
    last_lcdc: u8,
}

impl GameBoyApp {
    pub fn new(gb: GameBoy) -> Self {
        Self {
            gb,
            ..Self::default()
        }
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }
}

impl App for GameBoyApp {
    fn init(&mut self) {
        log::info!("Game Boy init");
        self.last_pc = self.gb.cpu.regs.pc;
        self.last_lcdc = self.gb.memory()[io::LCDC];
    }

    fn update(&mut self, screen: &mut [u8]) {
        self.gb.step_frame();

        let frame = self.gb.framebuffer();
        let n = screen.len().min(frame.len());
        screen[..n].copy_from_slice(&frame[..n]);

        self.frame_counter = self.frame_counter.wrapping_add(1);

        if let Some(fault) = self.gb.fault() {
            log::error!(
                "GB: stopped on unused opcode 0x{:02X} at 0x{:04X} after {} frames",
                fault.opcode,
                fault.address,
                self.frame_counter
            );
            self.should_exit = true;
            return;
        }

        let pc = self.gb.cpu.regs.pc;
        if pc == self.last_pc {
            self.pc_stagnant_frames = self.pc_stagnant_frames.saturating_add(1);
        } else {
            self.pc_stagnant_frames = 0;
            self.last_pc = pc;
        }

        let memory = self.gb.memory();
        let lcdc = memory[io::LCDC];
        let control = LcdControl::from_bits_retain(lcdc);
        if !control.contains(LcdControl::LCD_ENABLE) || !control.contains(LcdControl::BG_ENABLE) {
            self.lcdc_off_frames = self.lcdc_off_frames.saturating_add(1);
        } else {
            self.lcdc_off_frames = 0;
        }

        if lcdc != self.last_lcdc {
            log::debug!("GB LCDC changed: 0x{:02X} -> 0x{:02X}", self.last_lcdc, lcdc);
            self.last_lcdc = lcdc;
        }

        if self.frame_counter == 1 || self.frame_counter % 60 == 0 {
            let regs = &self.gb.cpu.regs;
            log::info!(
                "GB: frame={} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} ime={} halted={} stopped={} IF=0x{:02X} IE=0x{:02X} LCDC=0x{:02X} STAT=0x{:02X} LY={} SCX={} SCY={} WX={} WY={}",
                self.frame_counter,
                regs.pc,
                regs.sp,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                self.gb.cpu.ime,
                self.gb.cpu.halted,
                self.gb.cpu.stopped,
                memory[io::IF],
                memory[io::IE],
                lcdc,
                memory[io::STAT],
                self.gb.ppu().ly(),
                memory[io::SCX],
                memory[io::SCY],
                memory[io::WX],
                memory[io::WY],
            );

            if log::log_enabled!(log::Level::Debug) {
                let vram = memory.slice(0x8000..0xA000);
                let vram_nonzero = vram.iter().filter(|&&b| b != 0).count();
                let bg00 = memory[control.bg_map_base()];
                let win00 = memory[control.window_map_base()];
                log::debug!(
                    "GB video: vram_nonzero={} bg_map=0x{:04X} bg00=0x{:02X} win_map=0x{:04X} win00=0x{:02X}",
                    vram_nonzero,
                    control.bg_map_base(),
                    bg00,
                    control.window_map_base(),
                    win00,
                );
            }
        }

        if self.lcdc_off_frames == 120 {
            log::warn!(
                "GB: LCD/BG still disabled after ~120 frames (LCDC=0x{:02X}); screen stays blank",
                lcdc
            );
        }

        if self.pc_stagnant_frames == 600 {
            log::warn!(
                "GB: PC unchanged for ~600 frames at 0x{:04X} (halted={} stopped={})",
                pc,
                self.gb.cpu.halted,
                self.gb.cpu.stopped,
            );
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Game Boy exit after {} frames", self.frame_counter);
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "lcdboy".to_string()
    }
}
