//! RV32I disassembler built on the extraction generator.
//!
//! Operand fields are described in the same span notation the expression
//! generator reads, compiled once into an [Encoding] and evaluated per word.

use crate::{bits::sign_extend, encoding::Encoding, errors::ParseError};

/// Span description of the RV32I operand fields.
pub const RV32I_FIELDS: &str = "
opcode
6 6-0

rd
11 4-0

funct3
14 2-0

rs1
19 4-0

rs2
24 4-0

funct7
31 6-0

i_imm
31 11-0

s_imm
31 11-5
11 4-0

b_imm
31 12 10-5
11 4-1 11

u_imm
31 19-0

j_imm
31 20 10-1 11 19-12

shamt
24 4-0

pred
27 3-0

succ
23 3-0

csr
31 11-0

zimm
19 4-0
";

/// Printed for words that match no table entry.
pub const UNKNOWN: &str = "????";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Upper,
    Jump,
    JumpRegister,
    Load,
    OpImm,
    Shift,
    Branch,
    Store,
    Register,
    Fence,
    OpcodeOnly,
    Csr,
    CsrImm,
}

struct Instruction {
    mask: u32,
    matches: u32,
    mnemonic: &'static str,
    format: Format,
}

const OPCODE_MASK: u32 = 0x7f;
const FUNCT3_MASK: u32 = 0x7000;
const FUNCT7_MASK: u32 = 0xfe00_0000;
const FENCE_MASK: u32 = 0xf00f_ffff;
const EXACT_MASK: u32 = 0xffff_ffff;

const OP_F3: u32 = OPCODE_MASK | FUNCT3_MASK;
const OP_F3_F7: u32 = OPCODE_MASK | FUNCT3_MASK | FUNCT7_MASK;

macro_rules! insn {
    ($mask:expr, $matches:expr, $mnemonic:literal, $format:ident) => {
        Instruction {
            mask: $mask,
            matches: $matches,
            mnemonic: $mnemonic,
            format: Format::$format,
        }
    };
}

/// Matched first hit wins, so exact aliases come before their general forms.
const INSTRUCTIONS: &[Instruction] = &[
    insn!(EXACT_MASK, 0x0000_0013, "nop", OpcodeOnly),
    insn!(EXACT_MASK, 0x0000_8067, "ret", OpcodeOnly),
    insn!(OPCODE_MASK, 0x37, "lui", Upper),
    insn!(OPCODE_MASK, 0x17, "auipc", Upper),
    insn!(OPCODE_MASK, 0x6f, "jal", Jump),
    insn!(OP_F3, 0x67, "jalr", JumpRegister),
    insn!(OP_F3, 0x0063, "beq", Branch),
    insn!(OP_F3, 0x1063, "bne", Branch),
    insn!(OP_F3, 0x4063, "blt", Branch),
    insn!(OP_F3, 0x5063, "bge", Branch),
    insn!(OP_F3, 0x6063, "bltu", Branch),
    insn!(OP_F3, 0x7063, "bgeu", Branch),
    insn!(OP_F3, 0x0003, "lb", Load),
    insn!(OP_F3, 0x1003, "lh", Load),
    insn!(OP_F3, 0x2003, "lw", Load),
    insn!(OP_F3, 0x4003, "lbu", Load),
    insn!(OP_F3, 0x5003, "lhu", Load),
    insn!(OP_F3, 0x0023, "sb", Store),
    insn!(OP_F3, 0x1023, "sh", Store),
    insn!(OP_F3, 0x2023, "sw", Store),
    insn!(OP_F3, 0x0013, "addi", OpImm),
    insn!(OP_F3, 0x2013, "slti", OpImm),
    insn!(OP_F3, 0x3013, "sltiu", OpImm),
    insn!(OP_F3, 0x4013, "xori", OpImm),
    insn!(OP_F3, 0x6013, "ori", OpImm),
    insn!(OP_F3, 0x7013, "andi", OpImm),
    insn!(OP_F3_F7, 0x0000_1013, "slli", Shift),
    insn!(OP_F3_F7, 0x0000_5013, "srli", Shift),
    insn!(OP_F3_F7, 0x4000_5013, "srai", Shift),
    insn!(OP_F3_F7, 0x0000_0033, "add", Register),
    insn!(OP_F3_F7, 0x4000_0033, "sub", Register),
    insn!(OP_F3_F7, 0x0000_1033, "sll", Register),
    insn!(OP_F3_F7, 0x0000_2033, "slt", Register),
    insn!(OP_F3_F7, 0x0000_3033, "sltu", Register),
    insn!(OP_F3_F7, 0x0000_4033, "xor", Register),
    insn!(OP_F3_F7, 0x0000_5033, "srl", Register),
    insn!(OP_F3_F7, 0x4000_5033, "sra", Register),
    insn!(OP_F3_F7, 0x0000_6033, "or", Register),
    insn!(OP_F3_F7, 0x0000_7033, "and", Register),
    insn!(FENCE_MASK, 0x0f, "fence", Fence),
    insn!(EXACT_MASK, 0x100f, "fence.i", OpcodeOnly),
    insn!(EXACT_MASK, 0x0000_0073, "ecall", OpcodeOnly),
    insn!(EXACT_MASK, 0x0010_0073, "ebreak", OpcodeOnly),
    insn!(OP_F3, 0x1073, "csrrw", Csr),
    insn!(OP_F3, 0x2073, "csrrs", Csr),
    insn!(OP_F3, 0x3073, "csrrc", Csr),
    insn!(OP_F3, 0x5073, "csrrwi", CsrImm),
    insn!(OP_F3, 0x6073, "csrrsi", CsrImm),
    insn!(OP_F3, 0x7073, "csrrci", CsrImm),
];

const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", // x0  - x7
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5", // x8  - x15
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", // x16 - x23
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6", // x24 - x31
];

// User-level counters and floating-point CSRs.
const CSR_NAMES: &[(u64, &str)] = &[
    (0x001, "fflags"),
    (0x002, "frm"),
    (0x003, "fcsr"),
    (0xc00, "cycle"),
    (0xc01, "time"),
    (0xc02, "instret"),
    (0xc80, "cycleh"),
    (0xc81, "timeh"),
    (0xc82, "instreth"),
];

// i = 8, o = 4, r = 2, w = 1
const FENCE_FLAGS: [&str; 16] = [
    "", "w", "r", "rw", "o", "ow", "or", "orw", "i", "iw", "ir", "irw", "io", "iow", "ior", "iorw",
];

fn csr_name(csr: u64) -> &'static str {
    CSR_NAMES
        .iter()
        .find(|(number, _)| *number == csr)
        .map_or(UNKNOWN, |&(_, name)| name)
}

/// Decodes 32-bit RV32I words into assembler text.
#[derive(Debug, Clone)]
pub struct Disassembler {
    encoding: Encoding,
}

impl Disassembler {
    /// Compiles [RV32I_FIELDS].
    pub fn new() -> Result<Self, ParseError> {
        Ok(Disassembler {
            encoding: RV32I_FIELDS.parse()?,
        })
    }

    fn field(&self, name: &str, word: u32) -> u64 {
        self.encoding.extract(name, u64::from(word)).unwrap_or(0)
    }

    fn signed(&self, name: &str, word: u32) -> i64 {
        let width = self.encoding.get(name).map_or(64, |field| field.width);
        sign_extend(self.field(name, word), width)
    }

    fn reg(&self, name: &str, word: u32) -> &'static str {
        ABI_NAMES[(self.field(name, word) & 0x1f) as usize]
    }

    /// Disassembles `word` located at address `pc`. Branch and jump targets are
    /// printed as absolute addresses.
    pub fn decode(&self, pc: u32, word: u32) -> String {
        let Some(insn) = INSTRUCTIONS
            .iter()
            .find(|insn| word & insn.mask == insn.matches)
        else {
            return UNKNOWN.to_string();
        };

        let pc = i64::from(pc);

        let operands = match insn.format {
            Format::OpcodeOnly => String::new(),
            Format::Upper => format!(
                "{},{:#x}",
                self.reg("rd", word),
                self.field("u_imm", word)
            ),
            Format::Jump => format!(
                "{},{}",
                self.reg("rd", word),
                pc + self.signed("j_imm", word)
            ),
            Format::JumpRegister => format!(
                "{}({})",
                self.signed("i_imm", word),
                self.reg("rs1", word)
            ),
            Format::Load => format!(
                "{},{}({})",
                self.reg("rd", word),
                self.signed("i_imm", word),
                self.reg("rs1", word)
            ),
            Format::OpImm => format!(
                "{},{},{}",
                self.reg("rd", word),
                self.reg("rs1", word),
                self.signed("i_imm", word)
            ),
            Format::Shift => format!(
                "{},{},{:#x}",
                self.reg("rd", word),
                self.reg("rs1", word),
                self.field("shamt", word)
            ),
            Format::Branch => format!(
                "{},{},{}",
                self.reg("rs1", word),
                self.reg("rs2", word),
                pc + self.signed("b_imm", word)
            ),
            Format::Store => format!(
                "{},{}({})",
                self.reg("rs2", word),
                self.signed("s_imm", word),
                self.reg("rs1", word)
            ),
            Format::Register => format!(
                "{},{},{}",
                self.reg("rd", word),
                self.reg("rs1", word),
                self.reg("rs2", word)
            ),
            Format::Fence => {
                let pred = self.field("pred", word) as usize & 0xf;
                let succ = self.field("succ", word) as usize & 0xf;
                if pred == 0xf && succ == 0xf {
                    String::new()
                } else {
                    format!("{},{}", FENCE_FLAGS[pred], FENCE_FLAGS[succ])
                }
            }
            Format::Csr => format!(
                "{},{},{}",
                self.reg("rd", word),
                csr_name(self.field("csr", word)),
                self.reg("rs1", word)
            ),
            Format::CsrImm => format!(
                "{},{},{}",
                self.reg("rd", word),
                csr_name(self.field("csr", word)),
                self.field("zimm", word)
            ),
        };

        if operands.is_empty() {
            insn.mnemonic.to_string()
        } else {
            format!("{}\t{operands}", insn.mnemonic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u32) -> String {
        Disassembler::new().unwrap().decode(0, word)
    }

    #[test]
    fn test_aliases() {
        assert_eq!(decode(0x0000_0013), "nop");
        assert_eq!(decode(0x0000_8067), "ret");
        assert_eq!(decode(0x0000_0073), "ecall");
    }

    #[test]
    fn test_op_imm_sign_extends() {
        assert_eq!(decode(0x02a0_0093), "addi\tra,zero,42");
        assert_eq!(decode(0xfff0_0093), "addi\tra,zero,-1");
    }

    #[test]
    fn test_upper() {
        assert_eq!(decode(0x1234_52b7), "lui\tt0,0x12345");
    }

    #[test]
    fn test_jump_and_branch_targets() {
        let disasm = Disassembler::new().unwrap();
        assert_eq!(disasm.decode(0, 0x0080_00ef), "jal\tra,8");
        assert_eq!(disasm.decode(0x100, 0xfe00_0ee3), "beq\tzero,zero,252");
    }

    #[test]
    fn test_load_store() {
        assert_eq!(decode(0x00a1_2623), "sw\ta0,12(sp)");
        assert_eq!(decode(0xffc1_2503), "lw\ta0,-4(sp)");
    }

    #[test]
    fn test_register_and_shift() {
        assert_eq!(decode(0x40c5_8533), "sub\ta0,a1,a2");
        assert_eq!(decode(0x4035_5513), "srai\ta0,a0,0x3");
    }

    #[test]
    fn test_fence() {
        assert_eq!(decode(0x0ff0_000f), "fence");
        assert_eq!(decode(0x0310_000f), "fence\trw,w");
    }

    #[test]
    fn test_csr() {
        assert_eq!(decode(0xc000_2573), "csrrs\ta0,cycle,zero");
        assert_eq!(decode(0x0012_d073), "csrrwi\tzero,fflags,5");
        assert_eq!(decode(0x7c00_2573), "csrrs\ta0,????,zero");
    }

    #[test]
    fn test_unknown() {
        assert_eq!(decode(0xffff_ffff), UNKNOWN);
    }
}
