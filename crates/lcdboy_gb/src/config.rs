use typed_builder::TypedBuilder;

/// Machine construction options.
///
/// ```
/// use lcdboy_gb::GameBoyConfig;
///
/// let config = GameBoyConfig::builder().trace_serial(false).build();
/// assert!(config.boot_rom.is_none());
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// 256-byte DMG boot ROM overlaid at 0x0000 until 0xFF50 is written.
    /// Without one the machine starts at 0x0100 in the post-boot state.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    /// Log every byte sent over the serial side channel at debug level.
    #[builder(default = true)]
    pub trace_serial: bool,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
