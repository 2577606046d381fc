//! Data-driven encoding table.
//!
//! Every decodable instruction is one [`Encoding`] row: a `(mask, bits)` match pattern
//! over the raw word plus the ALU operation it selects. The table is the single source
//! of truth for ISA coverage; [`lookup`] scans it in order and returns the first match.
//!
//! Rows for `ecall`, `ebreak`, `fence` and the Zicsr instructions select
//! [`AluOp::Nop`]; the executors intercept them before the ALU is consulted.

use crate::core::pipeline::signals::{AluOp, FpOp};
use crate::isa::opcodes::{
    OP_AUIPC, OP_BRANCH, OP_FMADD, OP_FMSUB, OP_FNMADD, OP_FNMSUB, OP_FP, OP_IMM, OP_IMM_32,
    OP_JAL, OP_JALR, OP_LOAD, OP_LOAD_FP, OP_LUI, OP_MISC_MEM, OP_REG, OP_REG_32, OP_STORE,
    OP_STORE_FP, OP_SYSTEM, system,
};

/// One row of the encoding table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoding {
    /// Assembly mnemonic.
    pub name: &'static str,
    /// Bits of the word that identify the instruction.
    pub mask: u32,
    /// Required value of the masked bits.
    pub bits: u32,
    /// ALU operation the instruction selects.
    pub op: AluOp,
    /// The instruction only exists in RV64.
    pub rv64_only: bool,
}

impl Encoding {
    const fn new(name: &'static str, mask: u32, bits: u32, op: AluOp) -> Self {
        Self {
            name,
            mask,
            bits,
            op,
            rv64_only: false,
        }
    }

    const fn rv64(self) -> Self {
        Self {
            rv64_only: true,
            ..self
        }
    }

    /// True if `word` matches this row.
    #[inline]
    pub const fn matches(&self, word: u32) -> bool {
        word & self.mask == self.bits
    }
}

const MASK_OPCODE: u32 = 0x0000_007F;
const MASK_F3: u32 = 0x0000_707F;
const MASK_F3_F6: u32 = 0xFC00_707F;
const MASK_F3_F7: u32 = 0xFE00_707F;
const MASK_F7: u32 = 0xFE00_007F;
const MASK_F7_RS2: u32 = 0xFFF0_007F;
const MASK_F7_RS2_F3: u32 = 0xFFF0_707F;
const MASK_F2: u32 = 0x0600_007F;
const MASK_EXACT: u32 = 0xFFFF_FFFF;

/// Opcode only (U/J formats, `fence`).
const fn op(name: &'static str, opcode: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_OPCODE, opcode, alu)
}

/// Opcode and funct3 (I/S/B formats).
const fn i(name: &'static str, opcode: u32, f3: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F3, (f3 << 12) | opcode, alu)
}

/// Opcode, funct3 and funct7 (R format).
const fn r(name: &'static str, opcode: u32, f3: u32, f7: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F3_F7, (f7 << 25) | (f3 << 12) | opcode, alu)
}

/// RV64 immediate shift: funct6 leaves room for a 6-bit shift amount.
const fn shift(name: &'static str, f3: u32, f6: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F3_F6, (f6 << 26) | (f3 << 12) | OP_IMM, alu)
}

/// FP op whose funct3 is a rounding mode.
const fn fp(name: &'static str, f7: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F7, (f7 << 25) | OP_FP, alu)
}

/// FP op whose funct3 selects a sub-operation.
const fn fp_f3(name: &'static str, f7: u32, f3: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F3_F7, (f7 << 25) | (f3 << 12) | OP_FP, alu)
}

/// FP op selected by funct7 and rs2, with a rounding mode in funct3.
const fn fp_rs2(name: &'static str, f7: u32, rs2: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F7_RS2, (f7 << 25) | (rs2 << 20) | OP_FP, alu)
}

/// FP op fully selected by funct7, funct3 and `rs2 == 0` (moves, `fclass`).
const fn fp_move(name: &'static str, f7: u32, f3: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F7_RS2_F3, (f7 << 25) | (f3 << 12) | OP_FP, alu)
}

/// Fused multiply-add: opcode and the funct2 precision field.
const fn fma(name: &'static str, opcode: u32, f2: u32, alu: AluOp) -> Encoding {
    Encoding::new(name, MASK_F2, (f2 << 25) | opcode, alu)
}

const fn s(f: FpOp) -> AluOp {
    AluOp::Float(f)
}

const fn d(f: FpOp) -> AluOp {
    AluOp::Double(f)
}

/// The full encoding table of the RV32/RV64 IMFD subset.
pub static ENCODINGS: &[Encoding] = &[
    // RV32I / RV64I
    op("lui", OP_LUI, AluOp::Lui),
    op("auipc", OP_AUIPC, AluOp::Add),
    op("jal", OP_JAL, AluOp::Add),
    i("jalr", OP_JALR, 0b000, AluOp::Add),
    i("beq", OP_BRANCH, 0b000, AluOp::Sub),
    i("bne", OP_BRANCH, 0b001, AluOp::Sub),
    i("blt", OP_BRANCH, 0b100, AluOp::Slt),
    i("bge", OP_BRANCH, 0b101, AluOp::Slt),
    i("bltu", OP_BRANCH, 0b110, AluOp::Sltu),
    i("bgeu", OP_BRANCH, 0b111, AluOp::Sltu),
    i("lb", OP_LOAD, 0b000, AluOp::Add),
    i("lh", OP_LOAD, 0b001, AluOp::Add),
    i("lw", OP_LOAD, 0b010, AluOp::Add),
    i("ld", OP_LOAD, 0b011, AluOp::Add).rv64(),
    i("lbu", OP_LOAD, 0b100, AluOp::Add),
    i("lhu", OP_LOAD, 0b101, AluOp::Add),
    i("lwu", OP_LOAD, 0b110, AluOp::Add).rv64(),
    i("sb", OP_STORE, 0b000, AluOp::Add),
    i("sh", OP_STORE, 0b001, AluOp::Add),
    i("sw", OP_STORE, 0b010, AluOp::Add),
    i("sd", OP_STORE, 0b011, AluOp::Add).rv64(),
    i("addi", OP_IMM, 0b000, AluOp::Add),
    i("slti", OP_IMM, 0b010, AluOp::Slt),
    i("sltiu", OP_IMM, 0b011, AluOp::Sltu),
    i("xori", OP_IMM, 0b100, AluOp::Xor),
    i("ori", OP_IMM, 0b110, AluOp::Or),
    i("andi", OP_IMM, 0b111, AluOp::And),
    shift("slli", 0b001, 0b00_0000, AluOp::Sll),
    shift("srli", 0b101, 0b00_0000, AluOp::Srl),
    shift("srai", 0b101, 0b01_0000, AluOp::Sra),
    r("add", OP_REG, 0b000, 0b000_0000, AluOp::Add),
    r("sub", OP_REG, 0b000, 0b010_0000, AluOp::Sub),
    r("sll", OP_REG, 0b001, 0b000_0000, AluOp::Sll),
    r("slt", OP_REG, 0b010, 0b000_0000, AluOp::Slt),
    r("sltu", OP_REG, 0b011, 0b000_0000, AluOp::Sltu),
    r("xor", OP_REG, 0b100, 0b000_0000, AluOp::Xor),
    r("srl", OP_REG, 0b101, 0b000_0000, AluOp::Srl),
    r("sra", OP_REG, 0b101, 0b010_0000, AluOp::Sra),
    r("or", OP_REG, 0b110, 0b000_0000, AluOp::Or),
    r("and", OP_REG, 0b111, 0b000_0000, AluOp::And),
    i("addiw", OP_IMM_32, 0b000, AluOp::Addw).rv64(),
    r("slliw", OP_IMM_32, 0b001, 0b000_0000, AluOp::Sllw).rv64(),
    r("srliw", OP_IMM_32, 0b101, 0b000_0000, AluOp::Srlw).rv64(),
    r("sraiw", OP_IMM_32, 0b101, 0b010_0000, AluOp::Sraw).rv64(),
    r("addw", OP_REG_32, 0b000, 0b000_0000, AluOp::Addw).rv64(),
    r("subw", OP_REG_32, 0b000, 0b010_0000, AluOp::Subw).rv64(),
    r("sllw", OP_REG_32, 0b001, 0b000_0000, AluOp::Sllw).rv64(),
    r("srlw", OP_REG_32, 0b101, 0b000_0000, AluOp::Srlw).rv64(),
    r("sraw", OP_REG_32, 0b101, 0b010_0000, AluOp::Sraw).rv64(),
    op("fence", OP_MISC_MEM, AluOp::Nop),
    Encoding::new("ecall", MASK_EXACT, system::ECALL, AluOp::Nop),
    Encoding::new("ebreak", MASK_EXACT, system::EBREAK, AluOp::Nop),
    i("csrrw", OP_SYSTEM, 0b001, AluOp::Nop),
    i("csrrs", OP_SYSTEM, 0b010, AluOp::Nop),
    i("csrrc", OP_SYSTEM, 0b011, AluOp::Nop),
    i("csrrwi", OP_SYSTEM, 0b101, AluOp::Nop),
    i("csrrsi", OP_SYSTEM, 0b110, AluOp::Nop),
    i("csrrci", OP_SYSTEM, 0b111, AluOp::Nop),
    // M extension
    r("mul", OP_REG, 0b000, 0b000_0001, AluOp::Mul),
    r("mulh", OP_REG, 0b001, 0b000_0001, AluOp::Mulh),
    r("mulhsu", OP_REG, 0b010, 0b000_0001, AluOp::Mulhsu),
    r("mulhu", OP_REG, 0b011, 0b000_0001, AluOp::Mulhu),
    r("div", OP_REG, 0b100, 0b000_0001, AluOp::Div),
    r("divu", OP_REG, 0b101, 0b000_0001, AluOp::Divu),
    r("rem", OP_REG, 0b110, 0b000_0001, AluOp::Rem),
    r("remu", OP_REG, 0b111, 0b000_0001, AluOp::Remu),
    r("mulw", OP_REG_32, 0b000, 0b000_0001, AluOp::Mulw).rv64(),
    r("divw", OP_REG_32, 0b100, 0b000_0001, AluOp::Divw).rv64(),
    r("divuw", OP_REG_32, 0b101, 0b000_0001, AluOp::Divuw).rv64(),
    r("remw", OP_REG_32, 0b110, 0b000_0001, AluOp::Remw).rv64(),
    r("remuw", OP_REG_32, 0b111, 0b000_0001, AluOp::Remuw).rv64(),
    // F extension
    i("flw", OP_LOAD_FP, 0b010, AluOp::Add),
    i("fsw", OP_STORE_FP, 0b010, AluOp::Add),
    fma("fmadd.s", OP_FMADD, 0b00, s(FpOp::MulAdd)),
    fma("fmsub.s", OP_FMSUB, 0b00, s(FpOp::MulSub)),
    fma("fnmsub.s", OP_FNMSUB, 0b00, s(FpOp::NegMulSub)),
    fma("fnmadd.s", OP_FNMADD, 0b00, s(FpOp::NegMulAdd)),
    fp("fadd.s", 0b000_0000, s(FpOp::Add)),
    fp("fsub.s", 0b000_0100, s(FpOp::Sub)),
    fp("fmul.s", 0b000_1000, s(FpOp::Mul)),
    fp("fdiv.s", 0b000_1100, s(FpOp::Div)),
    fp_rs2("fsqrt.s", 0b010_1100, 0, s(FpOp::Sqrt)),
    fp_f3("fsgnj.s", 0b001_0000, 0b000, s(FpOp::SgnJ)),
    fp_f3("fsgnjn.s", 0b001_0000, 0b001, s(FpOp::SgnJn)),
    fp_f3("fsgnjx.s", 0b001_0000, 0b010, s(FpOp::SgnJx)),
    fp_f3("fmin.s", 0b001_0100, 0b000, s(FpOp::Min)),
    fp_f3("fmax.s", 0b001_0100, 0b001, s(FpOp::Max)),
    fp_rs2("fcvt.w.s", 0b110_0000, 0, s(FpOp::ToI32)),
    fp_rs2("fcvt.wu.s", 0b110_0000, 1, s(FpOp::ToU32)),
    fp_rs2("fcvt.l.s", 0b110_0000, 2, s(FpOp::ToI64)).rv64(),
    fp_rs2("fcvt.lu.s", 0b110_0000, 3, s(FpOp::ToU64)).rv64(),
    fp_move("fmv.x.w", 0b111_0000, 0b000, s(FpOp::MoveToInt)),
    fp_f3("feq.s", 0b101_0000, 0b010, s(FpOp::Eq)),
    fp_f3("flt.s", 0b101_0000, 0b001, s(FpOp::Lt)),
    fp_f3("fle.s", 0b101_0000, 0b000, s(FpOp::Le)),
    fp_move("fclass.s", 0b111_0000, 0b001, s(FpOp::Class)),
    fp_rs2("fcvt.s.w", 0b110_1000, 0, s(FpOp::FromI32)),
    fp_rs2("fcvt.s.wu", 0b110_1000, 1, s(FpOp::FromU32)),
    fp_rs2("fcvt.s.l", 0b110_1000, 2, s(FpOp::FromI64)).rv64(),
    fp_rs2("fcvt.s.lu", 0b110_1000, 3, s(FpOp::FromU64)).rv64(),
    fp_move("fmv.w.x", 0b111_1000, 0b000, s(FpOp::MoveFromInt)),
    fp_rs2("fcvt.s.d", 0b010_0000, 1, s(FpOp::Convert)),
    // D extension
    i("fld", OP_LOAD_FP, 0b011, AluOp::Add),
    i("fsd", OP_STORE_FP, 0b011, AluOp::Add),
    fma("fmadd.d", OP_FMADD, 0b01, d(FpOp::MulAdd)),
    fma("fmsub.d", OP_FMSUB, 0b01, d(FpOp::MulSub)),
    fma("fnmsub.d", OP_FNMSUB, 0b01, d(FpOp::NegMulSub)),
    fma("fnmadd.d", OP_FNMADD, 0b01, d(FpOp::NegMulAdd)),
    fp("fadd.d", 0b000_0001, d(FpOp::Add)),
    fp("fsub.d", 0b000_0101, d(FpOp::Sub)),
    fp("fmul.d", 0b000_1001, d(FpOp::Mul)),
    fp("fdiv.d", 0b000_1101, d(FpOp::Div)),
    fp_rs2("fsqrt.d", 0b010_1101, 0, d(FpOp::Sqrt)),
    fp_f3("fsgnj.d", 0b001_0001, 0b000, d(FpOp::SgnJ)),
    fp_f3("fsgnjn.d", 0b001_0001, 0b001, d(FpOp::SgnJn)),
    fp_f3("fsgnjx.d", 0b001_0001, 0b010, d(FpOp::SgnJx)),
    fp_f3("fmin.d", 0b001_0101, 0b000, d(FpOp::Min)),
    fp_f3("fmax.d", 0b001_0101, 0b001, d(FpOp::Max)),
    fp_rs2("fcvt.d.s", 0b010_0001, 0, d(FpOp::Convert)),
    fp_f3("feq.d", 0b101_0001, 0b010, d(FpOp::Eq)),
    fp_f3("flt.d", 0b101_0001, 0b001, d(FpOp::Lt)),
    fp_f3("fle.d", 0b101_0001, 0b000, d(FpOp::Le)),
    fp_move("fclass.d", 0b111_0001, 0b001, d(FpOp::Class)),
    fp_rs2("fcvt.w.d", 0b110_0001, 0, d(FpOp::ToI32)),
    fp_rs2("fcvt.wu.d", 0b110_0001, 1, d(FpOp::ToU32)),
    fp_rs2("fcvt.l.d", 0b110_0001, 2, d(FpOp::ToI64)).rv64(),
    fp_rs2("fcvt.lu.d", 0b110_0001, 3, d(FpOp::ToU64)).rv64(),
    fp_rs2("fcvt.d.w", 0b110_1001, 0, d(FpOp::FromI32)),
    fp_rs2("fcvt.d.wu", 0b110_1001, 1, d(FpOp::FromU32)),
    fp_rs2("fcvt.d.l", 0b110_1001, 2, d(FpOp::FromI64)).rv64(),
    fp_rs2("fcvt.d.lu", 0b110_1001, 3, d(FpOp::FromU64)).rv64(),
    fp_move("fmv.x.d", 0b111_0001, 0b000, d(FpOp::MoveToInt)).rv64(),
    fp_move("fmv.d.x", 0b111_1001, 0b000, d(FpOp::MoveFromInt)).rv64(),
];

/// Returns the first table row matching `word`, or `None` for an unknown encoding.
pub fn lookup(word: u32) -> Option<&'static Encoding> {
    ENCODINGS.iter().find(|e| e.matches(word))
}

/// Mnemonic of `word`, or `"unknown"`.
pub fn mnemonic(word: u32) -> &'static str {
    lookup(word).map_or("unknown", |e| e.name)
}
