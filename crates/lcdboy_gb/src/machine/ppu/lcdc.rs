use bitflags::bitflags;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct LcdControl: u8 {
        const LCD_ENABLE = 1 << 7;
        /// Window tile map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP = 1 << 6;
        const WINDOW_ENABLE = 1 << 5;
        /// Unsigned tile data at 0x8000 instead of signed around 0x9000.
        const TILE_DATA = 1 << 4;
        /// Background tile map at 0x9C00 instead of 0x9800.
        const BG_MAP = 1 << 3;
        /// 8x16 sprites.
        const SPRITE_SIZE = 1 << 2;
        const SPRITE_ENABLE = 1 << 1;
        const BG_ENABLE = 1 << 0;
    }
}

bitflags! {
    /// STAT (0xFF41) bits above the two mode bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct LcdStatus: u8 {
        const LYC_INTERRUPT = 1 << 6;
        const OAM_INTERRUPT = 1 << 5;
        const VBLANK_INTERRUPT = 1 << 4;
        const HBLANK_INTERRUPT = 1 << 3;
        const COINCIDENCE = 1 << 2;
        const MODE_HI = 1 << 1;
        const MODE_LO = 1 << 0;
    }
}

impl LcdStatus {
    /// Bits the CPU may write.
    pub const WRITABLE: u8 = 0x78;
}

impl LcdControl {
    pub fn bg_map_base(self) -> u16 {
        if self.contains(LcdControl::BG_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    pub fn window_map_base(self) -> u16 {
        if self.contains(LcdControl::WINDOW_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    /// Base address of tile data for background/window tiles: 0x8000 for
    /// unsigned indices, 0x9000 for signed ones.
    pub fn tile_data_base(self) -> u16 {
        if self.contains(LcdControl::TILE_DATA) {
            0x8000
        } else {
            0x9000
        }
    }

    /// Address of the first byte of background/window tile `index`.
    pub fn bg_tile_addr(self, index: u8) -> u16 {
        if self.contains(LcdControl::TILE_DATA) {
            0x8000 + index as u16 * 16
        } else {
            (0x9000i32 + (index as i8 as i32) * 16) as u16
        }
    }

    pub fn sprite_height(self) -> u8 {
        if self.contains(LcdControl::SPRITE_SIZE) {
            16
        } else {
            8
        }
    }
}
