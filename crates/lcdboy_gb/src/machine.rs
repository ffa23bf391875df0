mod bus;
mod cartridge;
pub mod debug_view;
mod gameboy;
pub mod io;
mod memory;
pub mod ppu;
mod serial;
mod timer;

pub use bus::BOOT_ROM_SIZE;
pub(crate) use bus::GameBoyBus;
pub use cartridge::{header_checksum_of, Cartridge, CartridgeHeader};
pub use gameboy::GameBoy;
pub use memory::Memory;
pub use ppu::{Ppu, PpuMode};

/// Total addressable memory for the Game Boy (64 KiB).
///
/// The address space is a flat image; side effects for specific IO
/// registers are layered on top by the bus.
pub const MEMORY_SIZE: usize = 0x10000;

/// CPU cycles in one full frame (154 lines of 456 cycles).
pub const CYCLES_PER_FRAME: u32 = 70_224;
