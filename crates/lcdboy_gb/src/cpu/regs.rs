use bitflags::bitflags;

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Bits 0–3 of F do not exist on hardware and always read as zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        const Z = 1 << 7;
        const N = 1 << 6;
        const H = 1 << 5;
        const C = 1 << 4;
    }
}

/// One 16-bit register pair viewed as two 8-bit halves.
///
/// The pair value is the only storage; the halves are derived on every
/// access, so writing a half is immediately visible through the pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair(u16);

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn lo(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_hi(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | ((value as u16) << 8);
    }

    #[inline]
    pub fn set_lo(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }
}

/// 8-bit operand selector in the standard opcode encoding order
/// (B, C, D, E, H, L, (HL), A).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    /// Memory at the address held in HL.
    HlInd,
    A,
}

impl R8 {
    pub(crate) fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => R8::B,
            1 => R8::C,
            2 => R8::D,
            3 => R8::E,
            4 => R8::H,
            5 => R8::L,
            6 => R8::HlInd,
            _ => R8::A,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            R8::B => "B",
            R8::C => "C",
            R8::D => "D",
            R8::E => "E",
            R8::H => "H",
            R8::L => "L",
            R8::HlInd => "(HL)",
            R8::A => "A",
        }
    }
}

/// 16-bit register pair selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

impl R16 {
    pub(crate) fn name(self) -> &'static str {
        match self {
            R16::AF => "AF",
            R16::BC => "BC",
            R16::DE => "DE",
            R16::HL => "HL",
            R16::SP => "SP",
        }
    }
}

/// Register file for the LR35902.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
///
/// The pairs are private so every write to F goes through the masking
/// accessors.
pub struct Registers {
    af: RegisterPair,
    bc: RegisterPair,
    de: RegisterPair,
    hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_hi(value);
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.af.lo()
    }

    #[inline]
    pub fn set_f(&mut self, value: u8) {
        // Lower 4 bits of F are always zero.
        self.af.set_lo(value & 0xF0);
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.f())
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.set_f(flags.bits());
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.get()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        self.af.set(value & 0xFFF0);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.get()
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc.set(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.get()
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de.set(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.get()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set(value);
    }

    /// Read an 8-bit register. `R8::HlInd` is a memory operand and has no
    /// register value; callers route it through the bus instead.
    pub fn get8(&self, reg: R8) -> u8 {
        match reg {
            R8::B => self.bc.hi(),
            R8::C => self.bc.lo(),
            R8::D => self.de.hi(),
            R8::E => self.de.lo(),
            R8::H => self.hl.hi(),
            R8::L => self.hl.lo(),
            R8::A => self.a(),
            R8::HlInd => 0,
        }
    }

    pub fn set8(&mut self, reg: R8, value: u8) {
        match reg {
            R8::B => self.bc.set_hi(value),
            R8::C => self.bc.set_lo(value),
            R8::D => self.de.set_hi(value),
            R8::E => self.de.set_lo(value),
            R8::H => self.hl.set_hi(value),
            R8::L => self.hl.set_lo(value),
            R8::A => self.set_a(value),
            R8::HlInd => {}
        }
    }

    pub fn get16(&self, reg: R16) -> u16 {
        match reg {
            R16::AF => self.af(),
            R16::BC => self.bc(),
            R16::DE => self.de(),
            R16::HL => self.hl(),
            R16::SP => self.sp,
        }
    }

    pub fn set16(&mut self, reg: R16, value: u16) {
        match reg {
            R16::AF => self.set_af(value),
            R16::BC => self.set_bc(value),
            R16::DE => self.set_de(value),
            R16::HL => self.set_hl(value),
            R16::SP => self.sp = value,
        }
    }
}
