use bitflags::bitflags;

use crate::machine::io;
use crate::machine::memory::Memory;
use crate::SCREEN_WIDTH;

use super::{LcdControl, Ppu};

bitflags! {
    /// Byte 3 of an OAM entry.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SpriteAttributes: u8 {
        /// Behind background colors 1–3. Not modelled by the renderer.
        const PRIORITY = 1 << 7;
        const Y_FLIP = 1 << 6;
        const X_FLIP = 1 << 5;
        /// OBP1 instead of OBP0.
        const PALETTE = 1 << 4;
    }
}

const SPRITE_COUNT: u16 = 40;
/// Sprite tiles always use unsigned addressing from 0x8000.
const SPRITE_TILE_BASE: u16 = 0x8000;

/// 2-bit color index of pixel (`x`, `y`) of the tile starting at
/// `tile_addr`. Bit 7 of each plane is the leftmost pixel; `y` may run past
/// 7 into the following tile for 8x16 sprites.
#[inline]
pub fn tile_pixel(memory: &Memory, tile_addr: u16, x: u8, y: u8) -> u8 {
    let row = tile_addr.wrapping_add(y as u16 * 2);
    let lo = memory[row];
    let hi = memory[row.wrapping_add(1)];
    let bit = 7 - (x & 0x07);
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}

impl Ppu {
    /// Render the current scanline into the framebuffer.
    pub(super) fn render_line(&mut self, memory: &Memory) {
        let start = self.ly as usize * SCREEN_WIDTH;
        if start + SCREEN_WIDTH > self.framebuffer.len() {
            return;
        }

        let mut line = [0u8; SCREEN_WIDTH];
        let control = self.control;

        if control.contains(LcdControl::BG_ENABLE) {
            render_background(memory, control, self.ly, &mut line);
            if render_window(memory, control, self.ly, self.window_line, &mut line) {
                self.window_line = self.window_line.wrapping_add(1);
            }
        }
        if control.contains(LcdControl::SPRITE_ENABLE) {
            render_sprites(memory, control, self.ly, &mut line);
        }

        self.framebuffer[start..start + SCREEN_WIDTH].copy_from_slice(&line);
    }
}

fn render_background(memory: &Memory, control: LcdControl, ly: u8, line: &mut [u8; SCREEN_WIDTH]) {
    let y = memory[io::SCY].wrapping_add(ly);
    let scx = memory[io::SCX];
    let map_row = control.bg_map_base() + (y as u16 / 8) * 32;

    for (x, pixel) in line.iter_mut().enumerate() {
        let bx = scx.wrapping_add(x as u8);
        let index = memory[map_row + bx as u16 / 8];
        *pixel = tile_pixel(memory, control.bg_tile_addr(index), bx % 8, y % 8);
    }
}

/// Draw the window over the background. Returns true when any window pixel
/// was drawn on this line.
fn render_window(
    memory: &Memory,
    control: LcdControl,
    ly: u8,
    window_line: u8,
    line: &mut [u8; SCREEN_WIDTH],
) -> bool {
    if !control.contains(LcdControl::WINDOW_ENABLE) {
        return false;
    }
    let wy = memory[io::WY];
    // WX is offset by 7; 0..=6 start partially off-screen.
    let wx = memory[io::WX] as i16 - 7;
    if ly < wy || wx >= SCREEN_WIDTH as i16 {
        return false;
    }

    let map_row = control.window_map_base() + (window_line as u16 / 8) * 32;
    let first = wx.max(0) as usize;
    for (x, pixel) in line.iter_mut().enumerate().skip(first) {
        let wx_px = (x as i16 - wx) as u16;
        let index = memory[map_row + wx_px / 8];
        *pixel = tile_pixel(memory, control.bg_tile_addr(index), (wx_px % 8) as u8, window_line % 8);
    }
    true
}

/// Draw up to 40 sprites. The first sprite in OAM order to put a
/// non-transparent pixel at a column keeps it.
fn render_sprites(memory: &Memory, control: LcdControl, ly: u8, line: &mut [u8; SCREEN_WIDTH]) {
    let height = control.sprite_height();
    let mut claimed = [false; SCREEN_WIDTH];

    for i in 0..SPRITE_COUNT {
        let entry = io::OAM_START + i * 4;
        let screen_y = memory[entry] as i16 - 16;
        let screen_x = memory[entry + 1] as i16 - 8;
        let mut tile = memory[entry + 2];
        let attrs = SpriteAttributes::from_bits_truncate(memory[entry + 3]);

        let row = ly as i16 - screen_y;
        if row < 0 || row >= height as i16 {
            continue;
        }
        let mut row = row as u8;
        if attrs.contains(SpriteAttributes::Y_FLIP) {
            row = height - 1 - row;
        }
        if height == 16 {
            tile &= 0xFE;
        }
        let tile_addr = SPRITE_TILE_BASE + tile as u16 * 16;

        for px in 0..8u8 {
            let x = screen_x + px as i16;
            if !(0..SCREEN_WIDTH as i16).contains(&x) || claimed[x as usize] {
                continue;
            }
            let col = if attrs.contains(SpriteAttributes::X_FLIP) {
                7 - px
            } else {
                px
            };
            let color = tile_pixel(memory, tile_addr, col, row);
            if color == 0 {
                continue;
            }
            line[x as usize] = color;
            claimed[x as usize] = true;
        }
    }
}
