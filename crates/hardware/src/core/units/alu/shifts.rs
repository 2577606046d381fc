//! ALU shift operations.
//!
//! Full-width shifts use the low 6 bits of `b` as the shift amount; word
//! shifts use the low 5 bits and sign-extend the 32-bit result.

use crate::core::pipeline::signals::AluOp;

use super::arithmetic::sext32;

/// Shift amount mask for 64-bit shifts.
const SHAMT_MASK_64: u64 = 0x3F;

/// Shift amount mask for 32-bit shifts.
const SHAMT_MASK_32: u64 = 0x1F;

/// Executes a shift. Word variants (`sllw`, `srlw`, `sraw`) operate on bits 31:0.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let sh = (b & SHAMT_MASK_64) as u32;
    let shw = (b & SHAMT_MASK_32) as u32;
    match op {
        AluOp::Sll => a << sh,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i64) >> sh) as u64,
        AluOp::Sllw => sext32(((a as u32) << shw) as i32),
        AluOp::Srlw => sext32(((a as u32) >> shw) as i32),
        AluOp::Sraw => sext32((a as i32) >> shw),
        _ => 0,
    }
}
