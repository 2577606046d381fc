//! ALU arithmetic operations.
//!
//! Implements addition, subtraction, multiplication, and division for full-width
//! and 32-bit word operands, including the M-extension multiply-high family.
//!
//! Every operation returns `(result, overflow)`. Overflow is reported for signed
//! add/sub/mul and for the `MIN / -1` division case. Division and remainder by
//! zero return `(0, false)` without raising anything.

use crate::core::pipeline::signals::AluOp;

/// Bits in a 32-bit word (high-multiply shift for RV32).
const WORD_BITS: u32 = 32;

/// Bits in a 64-bit register (high-multiply shift for RV64).
const XLEN_BITS: u32 = 64;

/// Sign-extends a 32-bit result into a 64-bit register value.
#[inline]
pub const fn sext32(v: i32) -> u64 {
    v as i64 as u64
}

/// Executes a full-width arithmetic operation.
///
/// Returns `(0, false)` for operations outside this group.
pub fn execute(op: AluOp, a: u64, b: u64) -> (u64, bool) {
    let (sa, sb) = (a as i64, b as i64);
    match op {
        AluOp::Add => {
            let (r, o) = sa.overflowing_add(sb);
            (r as u64, o)
        }
        AluOp::Sub => {
            let (r, o) = sa.overflowing_sub(sb);
            (r as u64, o)
        }
        AluOp::Mul => {
            let (r, o) = sa.overflowing_mul(sb);
            (r as u64, o)
        }
        AluOp::Mulh => ((((sa as i128) * (sb as i128)) >> XLEN_BITS) as u64, false),
        AluOp::Mulhsu => ((((sa as i128) * (b as i128)) >> XLEN_BITS) as u64, false),
        AluOp::Mulhu => ((((a as u128) * (b as u128)) >> XLEN_BITS) as u64, false),
        AluOp::Div => match sb {
            0 => (0, false),
            -1 if sa == i64::MIN => (i64::MIN as u64, true),
            _ => ((sa / sb) as u64, false),
        },
        AluOp::Rem => match sb {
            0 => (0, false),
            -1 if sa == i64::MIN => (0, true),
            _ => ((sa % sb) as u64, false),
        },
        AluOp::Divu => (a.checked_div(b).unwrap_or(0), false),
        AluOp::Remu => (a.checked_rem(b).unwrap_or(0), false),
        _ => execute_word(op, a, b),
    }
}

/// Executes a 32-bit ("w") arithmetic operation on the low words of `a` and `b`.
///
/// Results are sign-extended from bit 31.
pub fn execute_word(op: AluOp, a: u64, b: u64) -> (u64, bool) {
    let (wa, wb) = (a as i32, b as i32);
    let (ua, ub) = (a as u32, b as u32);
    match op {
        AluOp::Addw => {
            let (r, o) = wa.overflowing_add(wb);
            (sext32(r), o)
        }
        AluOp::Subw => {
            let (r, o) = wa.overflowing_sub(wb);
            (sext32(r), o)
        }
        AluOp::Mulw => {
            let (r, o) = wa.overflowing_mul(wb);
            (sext32(r), o)
        }
        AluOp::Divw => match wb {
            0 => (0, false),
            -1 if wa == i32::MIN => (sext32(i32::MIN), true),
            _ => (sext32(wa / wb), false),
        },
        AluOp::Remw => match wb {
            0 => (0, false),
            -1 if wa == i32::MIN => (0, true),
            _ => (sext32(wa % wb), false),
        },
        AluOp::Divuw => (ua.checked_div(ub).map_or(0, |q| sext32(q as i32)), false),
        AluOp::Remuw => (ua.checked_rem(ub).map_or(0, |r| sext32(r as i32)), false),
        _ => (0, false),
    }
}

/// Upper 32 bits of a 64-bit product, for RV32 `mulh*`.
pub fn mul_high_word(op: AluOp, a: u64, b: u64) -> (u64, bool) {
    let (sa, sb) = (i64::from(a as i32), i64::from(b as i32));
    let (ua, ub) = (u64::from(a as u32), u64::from(b as u32));
    let high = match op {
        AluOp::Mulh => (sa * sb) >> WORD_BITS,
        AluOp::Mulhsu => (sa * ub as i64) >> WORD_BITS,
        AluOp::Mulhu => ((ua * ub) >> WORD_BITS) as i64,
        _ => 0,
    };
    (sext32(high as i32), false)
}
