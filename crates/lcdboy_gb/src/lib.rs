pub mod app;
pub mod config;
pub mod cpu;
pub mod machine;

pub use app::GameBoyApp;
pub use config::GameBoyConfig;
pub use machine::{Cartridge, GameBoy};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Default integer scaling factor for windowed hosts.
pub const SCREEN_SCALE: u32 = 4;
