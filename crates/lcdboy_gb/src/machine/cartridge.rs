use std::path::Path;

use anyhow::{ensure, Context, Result};

/// Size of the fixed ROM window at 0x0000–0x7FFF.
pub const ROM_WINDOW_SIZE: usize = 0x8000;

const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0144;
const CARTRIDGE_TYPE: usize = 0x0147;
const ROM_SIZE_CODE: usize = 0x0148;
const RAM_SIZE_CODE: usize = 0x0149;
const HEADER_CHECKSUM: usize = 0x014D;
const MAX_ROM_SIZE_CODE: u8 = 8;

/// Parsed cartridge header (0x0134–0x014D).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub header_checksum: u8,
    pub checksum_valid: bool,
}

impl CartridgeHeader {
    /// Declared ROM size: 32 KiB shifted left by the size code.
    pub fn rom_size(&self) -> usize {
        ROM_WINDOW_SIZE << self.rom_size_code
    }

    /// True when the header declares a memory bank controller.
    pub fn has_mapper(&self) -> bool {
        self.cartridge_type != 0x00
    }

    fn parse(rom: &[u8]) -> Self {
        let title = rom[TITLE_START..TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_string();
        let header_checksum = rom[HEADER_CHECKSUM];

        Self {
            title,
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size_code: rom[ROM_SIZE_CODE],
            ram_size_code: rom[RAM_SIZE_CODE],
            header_checksum,
            checksum_valid: header_checksum_of(rom) == header_checksum,
        }
    }
}

/// Header checksum over 0x0134–0x014C as computed by the boot ROM.
pub fn header_checksum_of(rom: &[u8]) -> u8 {
    rom[TITLE_START..HEADER_CHECKSUM]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}

/// A validated cartridge image.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    header: CartridgeHeader,
}

impl Cartridge {
    /// Validate an in-memory ROM image.
    pub fn from_bytes(rom: Vec<u8>) -> Result<Self> {
        ensure!(
            rom.len() >= ROM_WINDOW_SIZE,
            "ROM image is {} bytes; at least {} are required",
            rom.len(),
            ROM_WINDOW_SIZE
        );

        let size_code = rom[ROM_SIZE_CODE];
        ensure!(
            size_code <= MAX_ROM_SIZE_CODE,
            "unsupported ROM size code 0x{:02X} at 0x0148",
            size_code
        );

        let header = CartridgeHeader::parse(&rom);
        ensure!(
            rom.len() >= header.rom_size(),
            "ROM image is {} bytes but the header declares {}",
            rom.len(),
            header.rom_size()
        );

        if !header.checksum_valid {
            log::warn!(
                "GB cartridge '{}': header checksum mismatch (stored 0x{:02X}, computed 0x{:02X})",
                header.title,
                header.header_checksum,
                header_checksum_of(&rom)
            );
        }
        if header.has_mapper() {
            log::warn!(
                "GB cartridge '{}': type 0x{:02X} uses a bank controller; only the first 32 KiB are mapped",
                header.title,
                header.cartridge_type
            );
        } else if header.rom_size() > ROM_WINDOW_SIZE {
            log::warn!(
                "GB cartridge '{}': declares {} bytes; only the first 32 KiB are mapped",
                header.title,
                header.rom_size()
            );
        }

        log::info!(
            "GB cartridge: title='{}' type=0x{:02X} rom={} bytes ram_code=0x{:02X}",
            header.title,
            header.cartridge_type,
            header.rom_size(),
            header.ram_size_code
        );

        Ok(Self { rom, header })
    }

    /// Read and validate a ROM file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rom = std::fs::read(path)
            .with_context(|| format!("failed to read ROM file '{}'", path.display()))?;
        Self::from_bytes(rom).with_context(|| format!("invalid ROM file '{}'", path.display()))
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    /// The bytes mapped at 0x0000–0x7FFF.
    pub fn rom_window(&self) -> &[u8] {
        &self.rom[..ROM_WINDOW_SIZE]
    }
}
