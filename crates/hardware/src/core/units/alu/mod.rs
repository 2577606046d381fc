//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the stateless functional core used by both executors.
//! It holds three operation tables:
//! - the integer table ([`Alu::execute`], [`Alu::execute_rv32`]), returning `(result, overflow)`;
//! - the single-precision table ([`Alu::execute_float`]);
//! - the double-precision table ([`Alu::execute_double`]).
//!
//! Integer operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh*, Div*, Rem* and their word forms
//! - [`logic`]:      And, Or, Xor, Slt, Sltu, Lui
//! - [`shifts`]:     Sll, Srl, Sra and their word forms
//!
//! Floating-point operations are delegated to the [`fpu`](crate::core::units::fpu).

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::core::pipeline::signals::{AluOp, FpOp};
use crate::core::units::fpu::{Fpu, exception_flags::FpFlags, rounding_modes::RoundingMode};

/// Stateless arithmetic logic unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer operation with 64-bit register semantics.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform.
    /// * `a`  - First operand.
    /// * `b`  - Second operand (immediate or `rs2`; shift amount for shifts).
    ///
    /// # Returns
    ///
    /// `(result, overflow)`. Floating-point and no-op variants return `(0, false)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvss_core::core::units::alu::Alu;
    /// use rvss_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), (50, false));
    /// assert_eq!(Alu::execute(AluOp::Add, i64::MAX as u64, 1).1, true);
    /// // Division by zero yields zero and no overflow.
    /// assert_eq!(Alu::execute(AluOp::Divu, 7, 0), (0, false));
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64) -> (u64, bool) {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu
            | AluOp::Addw
            | AluOp::Subw
            | AluOp::Mulw
            | AluOp::Divw
            | AluOp::Divuw
            | AluOp::Remw
            | AluOp::Remuw => arithmetic::execute(op, a, b),

            AluOp::And | AluOp::Or | AluOp::Xor | AluOp::Slt | AluOp::Sltu | AluOp::Lui => {
                (logic::execute(op, a, b), false)
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra | AluOp::Sllw | AluOp::Srlw | AluOp::Sraw => {
                (shifts::execute(op, a, b), false)
            }

            AluOp::Nop | AluOp::Float(_) | AluOp::Double(_) => (0, false),
        }
    }

    /// Executes an integer operation with 32-bit register semantics.
    ///
    /// Full-width operations are evaluated on the low 32 bits of each operand and
    /// the result is sign-extended; the register file truncates it on write-back.
    pub fn execute_rv32(op: AluOp, a: u64, b: u64) -> (u64, bool) {
        let word_op = match op {
            AluOp::Add => AluOp::Addw,
            AluOp::Sub => AluOp::Subw,
            AluOp::Mul => AluOp::Mulw,
            AluOp::Div => AluOp::Divw,
            AluOp::Divu => AluOp::Divuw,
            AluOp::Rem => AluOp::Remw,
            AluOp::Remu => AluOp::Remuw,
            AluOp::Sll => AluOp::Sllw,
            AluOp::Srl => AluOp::Srlw,
            AluOp::Sra => AluOp::Sraw,
            AluOp::Mulh | AluOp::Mulhsu | AluOp::Mulhu => {
                return arithmetic::mul_high_word(op, a, b);
            }
            AluOp::Slt | AluOp::Sltu => return (logic::compare_word(op, a, b), false),
            other => other,
        };
        Self::execute(word_op, a, b)
    }

    /// Executes a single-precision operation.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation from the single-precision table.
    /// * `a`, `b`, `c` - Raw register values (NaN-boxed FPRs, or an integer for
    ///   conversions from integer and `fmv.w.x`).
    /// * `rm` - Resolved rounding mode, applied to this call only.
    ///
    /// # Returns
    ///
    /// `(result, flags)` where the flags are to be OR'd into `fflags`.
    pub fn execute_float(op: FpOp, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        Fpu::execute_f32(op, a, b, c, rm)
    }

    /// Executes a double-precision operation. See [`Alu::execute_float`].
    pub fn execute_double(op: FpOp, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        Fpu::execute_f64(op, a, b, c, rm)
    }
}
