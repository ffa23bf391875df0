//! Debug renderings of video memory, independent of the scanline timing.
//!
//! Each view is a row-major buffer of 2-bit color indices, like the
//! framebuffer.

use super::memory::Memory;
use super::ppu::{tile_pixel, LcdControl};

/// 16 tiles per row.
pub const TILE_SHEET_WIDTH: usize = 128;
/// 384 tiles / 16 per row = 24 rows of tiles.
pub const TILE_SHEET_HEIGHT: usize = 192;
pub const BACKGROUND_SIZE: usize = 256;

const TILE_DATA_START: u16 = 0x8000;
const TILE_COUNT: usize = 384;
const TILES_PER_ROW: usize = 16;

/// All 384 tiles of 0x8000–0x97FF laid out in index order.
pub fn tile_sheet(memory: &Memory) -> Vec<u8> {
    let mut out = vec![0; TILE_SHEET_WIDTH * TILE_SHEET_HEIGHT];
    for tile in 0..TILE_COUNT {
        let tile_addr = TILE_DATA_START + (tile * 16) as u16;
        let origin_x = (tile % TILES_PER_ROW) * 8;
        let origin_y = (tile / TILES_PER_ROW) * 8;
        for y in 0..8u8 {
            for x in 0..8u8 {
                let idx = (origin_y + y as usize) * TILE_SHEET_WIDTH + origin_x + x as usize;
                out[idx] = tile_pixel(memory, tile_addr, x, y);
            }
        }
    }
    out
}

/// The full 256x256 background using the map and tile-data selection of
/// `control`. Scroll registers are ignored.
pub fn background_map(memory: &Memory, control: LcdControl) -> Vec<u8> {
    let mut out = vec![0; BACKGROUND_SIZE * BACKGROUND_SIZE];
    let map_base = control.bg_map_base();
    for (i, pixel) in out.iter_mut().enumerate() {
        let x = i % BACKGROUND_SIZE;
        let y = i / BACKGROUND_SIZE;
        let index = memory[map_base + ((y / 8) * 32 + x / 8) as u16];
        *pixel = tile_pixel(memory, control.bg_tile_addr(index), (x % 8) as u8, (y % 8) as u8);
    }
    out
}
