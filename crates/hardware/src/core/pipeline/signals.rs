//! Control and operation signals produced by instruction decode.
//!
//! This module defines the values the control decoder hands to the datapath:
//! 1. **ALU Operations:** [`AluOp`], covering the integer base ISA, the M extension,
//!    word-width variants, and the single/double floating-point tables.
//! 2. **FP Operations:** [`FpOp`], shared by both floating-point precisions.
//! 3. **Control Signals:** [`ControlSignals`], the per-opcode stage enables.

/// Floating-point operation, independent of precision.
///
/// Conversions name the integer side: `ToI32` is `fcvt.w.*`, `FromU64` is `fcvt.*.lu`.
/// `Convert` changes precision into the table's own format (`fcvt.s.d` in the single
/// table, `fcvt.d.s` in the double table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpOp {
    /// `fadd`
    Add,
    /// `fsub`
    Sub,
    /// `fmul`
    Mul,
    /// `fdiv`
    Div,
    /// `fsqrt`
    Sqrt,
    /// `fmin`
    Min,
    /// `fmax`
    Max,
    /// `fsgnj`
    SgnJ,
    /// `fsgnjn`
    SgnJn,
    /// `fsgnjx`
    SgnJx,
    /// `feq`
    Eq,
    /// `flt`
    Lt,
    /// `fle`
    Le,
    /// `fclass`
    Class,
    /// `fmadd`: `a * b + c`
    MulAdd,
    /// `fmsub`: `a * b - c`
    MulSub,
    /// `fnmsub`: `-(a * b) + c`
    NegMulSub,
    /// `fnmadd`: `-(a * b) - c`
    NegMulAdd,
    /// `fcvt.w.*`
    ToI32,
    /// `fcvt.wu.*`
    ToU32,
    /// `fcvt.l.*`
    ToI64,
    /// `fcvt.lu.*`
    ToU64,
    /// `fcvt.*.w`
    FromI32,
    /// `fcvt.*.wu`
    FromU32,
    /// `fcvt.*.l`
    FromI64,
    /// `fcvt.*.lu`
    FromU64,
    /// `fcvt.s.d` / `fcvt.d.s`
    Convert,
    /// `fmv.x.w` / `fmv.x.d`
    MoveToInt,
    /// `fmv.w.x` / `fmv.d.x`
    MoveFromInt,
}

impl FpOp {
    /// True when operand `a` comes from the integer register file.
    pub const fn reads_int_operand(self) -> bool {
        matches!(
            self,
            Self::FromI32 | Self::FromU32 | Self::FromI64 | Self::FromU64 | Self::MoveFromInt
        )
    }

    /// True when the result is written to the integer register file.
    pub const fn writes_int_result(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::Lt
                | Self::Le
                | Self::Class
                | Self::ToI32
                | Self::ToU32
                | Self::ToI64
                | Self::ToU64
                | Self::MoveToInt
        )
    }

    /// True when the `funct3` field is a rounding mode rather than a sub-opcode.
    pub const fn uses_rounding_mode(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Mul
                | Self::Div
                | Self::Sqrt
                | Self::MulAdd
                | Self::MulSub
                | Self::NegMulSub
                | Self::NegMulAdd
                | Self::ToI32
                | Self::ToU32
                | Self::ToI64
                | Self::ToU64
                | Self::FromI32
                | Self::FromU32
                | Self::FromI64
                | Self::FromU64
                | Self::Convert
        )
    }

    /// True for the fused multiply-add family (three FP sources).
    pub const fn is_fused(self) -> bool {
        matches!(
            self,
            Self::MulAdd | Self::MulSub | Self::NegMulSub | Self::NegMulAdd
        )
    }
}

/// Concrete operation selected by [`ControlDecoder::alu_signal`](crate::core::control::ControlDecoder::alu_signal).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// No operation; unrecognized encodings and system instructions decode here.
    #[default]
    Nop,
    /// Addition (also address generation and `auipc`/`jal` link).
    Add,
    /// Subtraction (also `beq`/`bne` comparison).
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than, signed (also `blt`/`bge`).
    Slt,
    /// Set less than, unsigned (also `bltu`/`bgeu`).
    Sltu,
    /// Bitwise exclusive or.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise or.
    Or,
    /// Bitwise and.
    And,
    /// Pass operand `b` through (`lui`).
    Lui,
    /// Multiply, low bits.
    Mul,
    /// Multiply high, signed x signed.
    Mulh,
    /// Multiply high, signed x unsigned.
    Mulhsu,
    /// Multiply high, unsigned x unsigned.
    Mulhu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
    /// 32-bit add, sign-extended.
    Addw,
    /// 32-bit subtract, sign-extended.
    Subw,
    /// 32-bit shift left, sign-extended.
    Sllw,
    /// 32-bit logical shift right, sign-extended.
    Srlw,
    /// 32-bit arithmetic shift right, sign-extended.
    Sraw,
    /// 32-bit multiply, sign-extended.
    Mulw,
    /// 32-bit signed division, sign-extended.
    Divw,
    /// 32-bit unsigned division, sign-extended.
    Divuw,
    /// 32-bit signed remainder, sign-extended.
    Remw,
    /// 32-bit unsigned remainder, sign-extended.
    Remuw,
    /// Single-precision floating-point operation.
    Float(FpOp),
    /// Double-precision floating-point operation.
    Double(FpOp),
}

impl AluOp {
    /// True for the single- and double-precision tables.
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Float(_) | Self::Double(_))
    }
}

/// Stage enables derived purely from the 7-bit opcode.
///
/// These decide which parts of the datapath an instruction uses, not which
/// operation it performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Second ALU operand is the immediate rather than `rs2`.
    pub alu_src: bool,
    /// Write-back value comes from memory rather than the ALU.
    pub mem_to_reg: bool,
    /// The instruction writes a destination register.
    pub reg_write: bool,
    /// The instruction reads memory.
    pub mem_read: bool,
    /// The instruction writes memory.
    pub mem_write: bool,
    /// The instruction may redirect the program counter.
    pub branch: bool,
}
