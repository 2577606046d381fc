//! ALU logical and comparison operations.
//!
//! Bitwise and/or/xor, signed and unsigned set-less-than, and the `lui`
//! pass-through. None of these overflow.

use crate::core::pipeline::signals::AluOp;

/// Executes a logical or comparison operation at full width.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u64::from((a as i64) < (b as i64)),
        AluOp::Sltu => u64::from(a < b),
        AluOp::Lui => b,
        _ => 0,
    }
}

/// Executes a comparison on the low 32 bits (RV32 `slt`/`sltu`).
pub fn compare_word(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Slt => u64::from((a as i32) < (b as i32)),
        AluOp::Sltu => u64::from((a as u32) < (b as u32)),
        _ => execute(op, a, b),
    }
}
