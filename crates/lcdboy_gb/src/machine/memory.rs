use std::ops::{Index, IndexMut, Range};

use crate::cpu::Interrupt;

use super::{io, MEMORY_SIZE};

/// Flat 64 KiB memory image.
///
/// Indexed by `u16`, so every address is always backed by storage. The
/// image holds the raw register bytes too; the bus applies side effects
/// before storing them here.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Copy `data` into the image starting at `offset`, clipped to the end
    /// of the address space.
    pub fn load(&mut self, offset: u16, data: &[u8]) {
        let start = offset as usize;
        let len = data.len().min(MEMORY_SIZE - start);
        self.bytes[start..start + len].copy_from_slice(&data[..len]);
    }

    pub fn slice(&self, range: Range<u16>) -> &[u8] {
        &self.bytes[range.start as usize..range.end as usize]
    }

    /// Set the IF bit(s) for `interrupt`.
    #[inline]
    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self[io::IF] |= interrupt.bits();
    }
}

impl Index<u16> for Memory {
    type Output = u8;

    #[inline]
    fn index(&self, addr: u16) -> &u8 {
        &self.bytes[addr as usize]
    }
}

impl IndexMut<u16> for Memory {
    #[inline]
    fn index_mut(&mut self, addr: u16) -> &mut u8 {
        &mut self.bytes[addr as usize]
    }
}
