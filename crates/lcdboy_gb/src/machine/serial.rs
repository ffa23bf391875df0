/// Bytes of undrained serial output kept before the oldest half is dropped.
pub(crate) const OUTPUT_CAPACITY: usize = 64 * 1024;

/// Serial side channel modelled via SB/SC.
///
/// No link partner exists. When a transfer is started on SC (bit 7 set with
/// the internal clock in bit 0) the current SB byte is captured in `output`
/// so test ROMs can report their results, and SC reads back as 0.
///
/// Hosts drain `output` through `GameBoy::take_serial_output`. An undrained
/// buffer keeps only the most recent `OUTPUT_CAPACITY` bytes.
#[derive(Clone, Debug, Default)]
pub(crate) struct Serial {
    pub(crate) output: Vec<u8>,
    pub(crate) trace: bool,
}

impl Serial {
    pub(super) fn new(trace: bool) -> Self {
        Self {
            output: Vec::new(),
            trace,
        }
    }

    /// Handle a write to SC. Returns the byte to store in SC.
    pub(super) fn write_sc(&mut self, value: u8, sb: u8) -> u8 {
        if value & 0x81 != 0x81 {
            return value;
        }
        if self.output.len() >= OUTPUT_CAPACITY {
            self.output.drain(..OUTPUT_CAPACITY / 2);
        }
        self.output.push(sb);
        if self.trace {
            log::debug!(
                "GB serial: 0x{:02X} {:?}",
                sb,
                char::from(sb).escape_default().to_string()
            );
        }
        0
    }

    pub(super) fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}
