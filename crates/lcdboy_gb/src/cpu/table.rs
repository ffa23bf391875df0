//! Primary and CB-extended instruction tables.
//!
//! Both tables are built once from the standard `x/y/z/p/q` opcode
//! decomposition. Every slot carries its mnemonic template, length, base
//! cycle cost and the decoded [`Op`]; the eleven unused primary slots carry
//! `None` and fault when fetched.

use std::fmt;

use once_cell::sync::OnceCell;

use super::regs::{R16, R8};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    /// Mnemonic prefix; ADD/ADC/SBC name the accumulator explicitly.
    fn prefix(self) -> &'static str {
        match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        }
    }
}

/// Branch condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        }
    }
}

/// Rotate/shift family of the extended table (first quarter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl RotOp {
    fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => RotOp::Rlc,
            1 => RotOp::Rrc,
            2 => RotOp::Rl,
            3 => RotOp::Rr,
            4 => RotOp::Sla,
            5 => RotOp::Sra,
            6 => RotOp::Swap,
            _ => RotOp::Srl,
        }
    }

    fn name(self) -> &'static str {
        match self {
            RotOp::Rlc => "RLC",
            RotOp::Rrc => "RRC",
            RotOp::Rl => "RL",
            RotOp::Rr => "RR",
            RotOp::Sla => "SLA",
            RotOp::Sra => "SRA",
            RotOp::Swap => "SWAP",
            RotOp::Srl => "SRL",
        }
    }
}

/// Memory operand of `LD (rr),A` / `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    BC,
    DE,
    /// (HL+): post-increment.
    HlInc,
    /// (HL-): post-decrement.
    HlDec,
}

impl Indirect {
    fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Indirect::BC,
            1 => Indirect::DE,
            2 => Indirect::HlInc,
            _ => Indirect::HlDec,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HlInc => "(HL+)",
            Indirect::HlDec => "(HL-)",
        }
    }
}

/// Decoded instruction kind. One variant per mnemonic family; operands that
/// come from the instruction stream are read into the CPU's operand latch
/// before the handler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    /// 0xCB: decode the next byte through the extended table.
    Prefix,

    LdR8R8(R8, R8),
    LdR8Imm(R8),
    LdR16Imm(R16),
    LdIndA(Indirect),
    LdAInd(Indirect),
    /// LD (a16),SP
    LdAddrSp,
    /// LD (a16),A
    LdAddrA,
    /// LD A,(a16)
    LdAAddr,
    /// LDH (a8),A
    LdhImmA,
    /// LDH A,(a8)
    LdhAImm,
    /// LD (C),A
    LdhCA,
    /// LD A,(C)
    LdhAC,
    LdSpHl,
    /// LD HL,SP+r8
    LdHlSpOffset,

    Inc16(R16),
    Dec16(R16),
    AddHl(R16),
    AddSpOffset,
    Inc8(R8),
    Dec8(R8),
    Alu(AluOp, R8),
    AluImm(AluOp),

    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    Jr,
    JrCond(Cond),
    Jp,
    JpCond(Cond),
    JpHl,
    Call,
    CallCond(Cond),
    Ret,
    RetCond(Cond),
    Reti,
    /// RST to the given vector.
    Rst(u8),
    Push(R16),
    Pop(R16),

    Rot(RotOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

/// One table slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// Mnemonic template; `d8`, `d16`, `a8`, `a16` and `r8` mark the operand.
    pub mnemonic: String,
    /// Total length in bytes (1–3). Extended entries count only their own
    /// byte.
    pub length: u8,
    /// Base cycle cost. Conditional branches list the not-taken cost.
    pub cycles: u32,
    pub op: Option<Op>,
}

impl Descriptor {
    fn new(mnemonic: impl Into<String>, length: u8, cycles: u32, op: Op) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            length,
            cycles,
            op: Some(op),
        }
    }

    fn unused() -> Self {
        Self {
            mnemonic: "UNUSED".to_string(),
            length: 1,
            cycles: 4,
            op: None,
        }
    }

    /// Number of operand bytes following the opcode.
    pub fn arity(&self) -> u8 {
        self.length.saturating_sub(1)
    }

    /// Render the mnemonic with `operand` substituted for its placeholder.
    pub fn disassemble(&self, operand: u16) -> String {
        let signed = format!("{:+}", operand as u8 as i8);
        self.mnemonic
            .replace("d16", &format!("${operand:04X}"))
            .replace("a16", &format!("${operand:04X}"))
            .replace("(a8)", &format!("($FF{:02X})", operand as u8))
            .replace("d8", &format!("${:02X}", operand as u8))
            .replace("+r8", &signed)
            .replace("r8", &signed)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic)
    }
}

/// Cost of a register operand vs. the (HL) memory operand.
fn r8_cost(reg: R8, register: u32, memory: u32) -> u32 {
    if reg == R8::HlInd {
        memory
    } else {
        register
    }
}

fn rp(p: u8) -> R16 {
    match p & 0x03 {
        0 => R16::BC,
        1 => R16::DE,
        2 => R16::HL,
        _ => R16::SP,
    }
}

/// Register pair table for PUSH/POP, where slot 3 is AF.
fn rp2(p: u8) -> R16 {
    match p & 0x03 {
        3 => R16::AF,
        other => rp(other),
    }
}

fn decode_primary(opcode: u8) -> Descriptor {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    match x {
        0 => match z {
            0 => match y {
                0 => Descriptor::new("NOP", 1, 4, Op::Nop),
                1 => Descriptor::new("LD (a16),SP", 3, 20, Op::LdAddrSp),
                2 => Descriptor::new("STOP", 2, 4, Op::Stop),
                3 => Descriptor::new("JR r8", 2, 12, Op::Jr),
                _ => {
                    let cond = Cond::from_index(y - 4);
                    Descriptor::new(format!("JR {},r8", cond.name()), 2, 8, Op::JrCond(cond))
                }
            },
            1 => {
                let rr = rp(p);
                if q == 0 {
                    Descriptor::new(format!("LD {},d16", rr.name()), 3, 12, Op::LdR16Imm(rr))
                } else {
                    Descriptor::new(format!("ADD HL,{}", rr.name()), 1, 8, Op::AddHl(rr))
                }
            }
            2 => {
                let ind = Indirect::from_index(p);
                if q == 0 {
                    Descriptor::new(format!("LD {},A", ind.name()), 1, 8, Op::LdIndA(ind))
                } else {
                    Descriptor::new(format!("LD A,{}", ind.name()), 1, 8, Op::LdAInd(ind))
                }
            }
            3 => {
                let rr = rp(p);
                if q == 0 {
                    Descriptor::new(format!("INC {}", rr.name()), 1, 8, Op::Inc16(rr))
                } else {
                    Descriptor::new(format!("DEC {}", rr.name()), 1, 8, Op::Dec16(rr))
                }
            }
            4 => {
                let r = R8::from_index(y);
                Descriptor::new(format!("INC {}", r.name()), 1, r8_cost(r, 4, 12), Op::Inc8(r))
            }
            5 => {
                let r = R8::from_index(y);
                Descriptor::new(format!("DEC {}", r.name()), 1, r8_cost(r, 4, 12), Op::Dec8(r))
            }
            6 => {
                let r = R8::from_index(y);
                Descriptor::new(format!("LD {},d8", r.name()), 2, r8_cost(r, 8, 12), Op::LdR8Imm(r))
            }
            _ => {
                let (name, op) = match y {
                    0 => ("RLCA", Op::Rlca),
                    1 => ("RRCA", Op::Rrca),
                    2 => ("RLA", Op::Rla),
                    3 => ("RRA", Op::Rra),
                    4 => ("DAA", Op::Daa),
                    5 => ("CPL", Op::Cpl),
                    6 => ("SCF", Op::Scf),
                    _ => ("CCF", Op::Ccf),
                };
                Descriptor::new(name, 1, 4, op)
            }
        },
        1 => {
            if opcode == 0x76 {
                return Descriptor::new("HALT", 1, 4, Op::Halt);
            }
            let dst = R8::from_index(y);
            let src = R8::from_index(z);
            let cycles = if dst == R8::HlInd || src == R8::HlInd { 8 } else { 4 };
            Descriptor::new(
                format!("LD {},{}", dst.name(), src.name()),
                1,
                cycles,
                Op::LdR8R8(dst, src),
            )
        }
        2 => {
            let alu = AluOp::from_index(y);
            let r = R8::from_index(z);
            Descriptor::new(
                format!("{}{}", alu.prefix(), r.name()),
                1,
                r8_cost(r, 4, 8),
                Op::Alu(alu, r),
            )
        }
        _ => match z {
            0 => match y {
                0..=3 => {
                    let cond = Cond::from_index(y);
                    Descriptor::new(format!("RET {}", cond.name()), 1, 8, Op::RetCond(cond))
                }
                4 => Descriptor::new("LDH (a8),A", 2, 12, Op::LdhImmA),
                5 => Descriptor::new("ADD SP,r8", 2, 16, Op::AddSpOffset),
                6 => Descriptor::new("LDH A,(a8)", 2, 12, Op::LdhAImm),
                _ => Descriptor::new("LD HL,SP+r8", 2, 12, Op::LdHlSpOffset),
            },
            1 => {
                if q == 0 {
                    let rr = rp2(p);
                    return Descriptor::new(format!("POP {}", rr.name()), 1, 12, Op::Pop(rr));
                }
                match p {
                    0 => Descriptor::new("RET", 1, 16, Op::Ret),
                    1 => Descriptor::new("RETI", 1, 16, Op::Reti),
                    2 => Descriptor::new("JP HL", 1, 4, Op::JpHl),
                    _ => Descriptor::new("LD SP,HL", 1, 8, Op::LdSpHl),
                }
            }
            2 => match y {
                0..=3 => {
                    let cond = Cond::from_index(y);
                    Descriptor::new(format!("JP {},a16", cond.name()), 3, 12, Op::JpCond(cond))
                }
                4 => Descriptor::new("LD (C),A", 1, 8, Op::LdhCA),
                5 => Descriptor::new("LD (a16),A", 3, 16, Op::LdAddrA),
                6 => Descriptor::new("LD A,(C)", 1, 8, Op::LdhAC),
                _ => Descriptor::new("LD A,(a16)", 3, 16, Op::LdAAddr),
            },
            3 => match y {
                0 => Descriptor::new("JP a16", 3, 16, Op::Jp),
                1 => Descriptor::new("PREFIX CB", 1, 4, Op::Prefix),
                6 => Descriptor::new("DI", 1, 4, Op::Di),
                7 => Descriptor::new("EI", 1, 4, Op::Ei),
                // 0xD3, 0xDB, 0xE3, 0xEB
                _ => Descriptor::unused(),
            },
            4 => match y {
                0..=3 => {
                    let cond = Cond::from_index(y);
                    Descriptor::new(format!("CALL {},a16", cond.name()), 3, 12, Op::CallCond(cond))
                }
                // 0xE4, 0xEC, 0xF4, 0xFC
                _ => Descriptor::unused(),
            },
            5 => {
                if q == 0 {
                    let rr = rp2(p);
                    Descriptor::new(format!("PUSH {}", rr.name()), 1, 16, Op::Push(rr))
                } else if p == 0 {
                    Descriptor::new("CALL a16", 3, 24, Op::Call)
                } else {
                    // 0xDD, 0xED, 0xFD
                    Descriptor::unused()
                }
            }
            6 => {
                let alu = AluOp::from_index(y);
                Descriptor::new(format!("{}d8", alu.prefix()), 2, 8, Op::AluImm(alu))
            }
            _ => {
                let vector = y * 8;
                Descriptor::new(format!("RST {vector:02X}H"), 1, 16, Op::Rst(vector))
            }
        },
    }
}

fn decode_extended(opcode: u8) -> Descriptor {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let r = R8::from_index(opcode);

    let (mnemonic, op) = match x {
        0 => {
            let rot = RotOp::from_index(y);
            (format!("{} {}", rot.name(), r.name()), Op::Rot(rot, r))
        }
        1 => (format!("BIT {},{}", y, r.name()), Op::Bit(y, r)),
        2 => (format!("RES {},{}", y, r.name()), Op::Res(y, r)),
        _ => (format!("SET {},{}", y, r.name()), Op::Set(y, r)),
    };

    // BIT only reads (HL); the other memory forms read and write it back.
    let memory_cost = if matches!(op, Op::Bit(..)) { 8 } else { 12 };
    Descriptor::new(mnemonic, 1, r8_cost(r, 4, memory_cost), op)
}

static PRIMARY: OnceCell<[Descriptor; 256]> = OnceCell::new();
static EXTENDED: OnceCell<[Descriptor; 256]> = OnceCell::new();

#[inline]
pub fn primary(opcode: u8) -> &'static Descriptor {
    let table = PRIMARY.get_or_init(|| std::array::from_fn(|op| decode_primary(op as u8)));
    &table[opcode as usize]
}

#[inline]
pub fn extended(opcode: u8) -> &'static Descriptor {
    let table = EXTENDED.get_or_init(|| std::array::from_fn(|op| decode_extended(op as u8)));
    &table[opcode as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNUSED: [u8; 11] = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];

    #[test]
    fn tables_are_built_once() {
        assert!(std::ptr::eq(primary(0x3E), primary(0x3E)));
        assert!(std::ptr::eq(extended(0x7C), extended(0x7C)));
        assert_eq!(extended(0x7C).mnemonic, "BIT 7,H");
    }

    #[test]
    fn exactly_the_eleven_holes_are_unused() {
        for opcode in 0..=255u8 {
            let desc = primary(opcode);
            assert_eq!(
                desc.op.is_none(),
                UNUSED.contains(&opcode),
                "opcode {opcode:#04X} ({desc})"
            );
        }
        assert!((0..=255u8).all(|op| extended(op).op.is_some()));
    }

    #[test]
    fn lengths_match_operand_placeholders() {
        for opcode in 0..=255u8 {
            let desc = primary(opcode);
            if desc.op.is_none() {
                continue;
            }
            let m = &desc.mnemonic;
            let expected = if m.contains("16") {
                3
            } else if m.contains("d8") || m.contains("a8") || m.contains("r8") || m == "STOP" {
                2
            } else {
                1
            };
            assert_eq!(desc.length, expected, "{m}");
            assert_eq!(desc.arity(), expected - 1);
        }
    }

    #[test]
    fn spot_check_decoding() {
        assert_eq!(primary(0x00).op, Some(Op::Nop));
        assert_eq!(primary(0x36).op, Some(Op::LdR8Imm(R8::HlInd)));
        assert_eq!(primary(0x36).cycles, 12);
        assert_eq!(primary(0x41).op, Some(Op::LdR8R8(R8::B, R8::C)));
        assert_eq!(primary(0x76).op, Some(Op::Halt));
        assert_eq!(primary(0xAF).op, Some(Op::Alu(AluOp::Xor, R8::A)));
        assert_eq!(primary(0xC5).op, Some(Op::Push(R16::BC)));
        assert_eq!(primary(0xF1).op, Some(Op::Pop(R16::AF)));
        assert_eq!(primary(0xFF).op, Some(Op::Rst(0x38)));
        assert_eq!(primary(0xCD).cycles, 24);
        assert_eq!(primary(0xC0).cycles, 8);

        assert_eq!(extended(0x7E).op, Some(Op::Bit(7, R8::HlInd)));
        assert_eq!(extended(0x7E).cycles, 8);
        assert_eq!(extended(0x86).cycles, 12);
        assert_eq!(extended(0x37).op, Some(Op::Rot(RotOp::Swap, R8::A)));
        assert_eq!(extended(0x37).cycles, 4);
    }

    #[test]
    fn disassembly_substitutes_operands() {
        assert_eq!(primary(0x01).disassemble(0xBEEF), "LD BC,$BEEF");
        assert_eq!(primary(0x20).disassemble(0x00FB), "JR NZ,-5");
        assert_eq!(primary(0xE0).disassemble(0x0040), "LDH ($FF40),A");
        assert_eq!(primary(0xF8).disassemble(0x0002), "LD HL,SP+2");
        assert_eq!(primary(0x3E).disassemble(0x0007), "LD A,$07");
        assert_eq!(primary(0xC3).disassemble(0x0150), "JP $0150");
        assert_eq!(primary(0xEF).to_string(), "RST 28H");
    }
}
