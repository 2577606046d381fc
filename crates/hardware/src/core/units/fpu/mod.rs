//! Floating-Point Unit (FPU).
//!
//! This module implements the single- and double-precision operation tables used by
//! the Execute stage. Arithmetic, square root, fused multiply-add, and conversions are
//! evaluated with a bit-exact software IEEE 754 implementation, so the requested
//! rounding mode applies to exactly one call and the raised exception flags are
//! reported precisely. Sign injection, min/max, comparisons, and classification are
//! bit-level operations.
//!
//! Operations are organized into submodules:
//! - [`nan_handling`]: NaN boxing, canonical NaNs, min/max and compare rules.
//! - [`rounding_modes`]: Rounding mode decoding and dynamic resolution.
//! - [`exception_flags`]: The sticky `fflags` set.
//! - [`classify`]: The `fclass` one-hot mask.

/// `FCLASS` classification.
pub mod classify;

/// Floating-point exception flag types.
pub mod exception_flags;

/// NaN boxing, unboxing, and canonical NaN propagation.
pub mod nan_handling;

/// Rounding mode definitions and support.
pub mod rounding_modes;

use simple_soft_float::{F32, F64, FPState};

use crate::core::pipeline::signals::FpOp;
use crate::core::units::alu::arithmetic::sext32;

use self::classify::classify;
use self::exception_flags::FpFlags;
use self::nan_handling::{F32_LAYOUT, F64_LAYOUT, box_f32, unbox_f32};
use self::rounding_modes::RoundingMode;

/// Floating-Point Unit. Stateless; every call carries its own rounding mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fpu;

/// Outcome of a float-to-integer conversion before flag merging.
struct Converted {
    value: u64,
    invalid: bool,
}

/// Saturates an out-of-range or NaN conversion to the RISC-V defined extreme.
///
/// NaN and positive overflow produce `max`; negative overflow produces `min`.
fn saturate<T: Copy>(
    result: Option<T>,
    is_nan: bool,
    negative: bool,
    min: T,
    max: T,
    to_reg: fn(T) -> u64,
) -> Converted {
    match result {
        Some(v) => Converted {
            value: to_reg(v),
            invalid: false,
        },
        None => {
            let v = if !is_nan && negative { min } else { max };
            Converted {
                value: to_reg(v),
                invalid: true,
            }
        }
    }
}

#[inline]
fn soft32(bits: u64) -> F32 {
    F32::from_bits(bits as u32)
}

#[inline]
fn soft64(bits: u64) -> F64 {
    F64::from_bits(bits)
}

/// Canonicalizes and NaN-boxes a single-precision arithmetic result.
#[inline]
fn pack32(r: F32) -> u64 {
    box_f32(F32_LAYOUT.canonicalize(u64::from(r.into_bits())) as u32)
}

/// Canonicalizes a double-precision arithmetic result.
#[inline]
fn pack64(r: F64) -> u64 {
    F64_LAYOUT.canonicalize(r.into_bits())
}

impl Fpu {
    /// Executes a single-precision operation.
    ///
    /// FP operands are read from NaN-boxed register values; an improperly boxed
    /// operand is treated as the canonical NaN. Integer operands (conversions from
    /// integer, `fmv.w.x`) use the low bits of `a`.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation to perform.
    /// * `a`, `b`, `c` - Raw register operands (`c` only for the fused family).
    /// * `rm` - Rounding mode for this call.
    ///
    /// # Returns
    ///
    /// `(result, flags)`. FP results are NaN-boxed; integer results (compare,
    /// classify, conversions to integer, `fmv.x.w`) are sign-extended to 64 bits.
    pub fn execute_f32(op: FpOp, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let layout = &F32_LAYOUT;
        let (ua, ub, uc) = (
            u64::from(unbox_f32(a)),
            u64::from(unbox_f32(b)),
            u64::from(unbox_f32(c)),
        );
        let srm = Some(rm.to_soft());
        let mut st = FPState::default();
        let mut extra = FpFlags::NONE;
        let nan = layout.is_nan(ua);
        let neg = layout.is_negative(ua);

        let converted = match op {
            FpOp::ToI32 => Some(saturate(
                soft32(ua).to_i32(true, srm, Some(&mut st)),
                nan,
                neg,
                i32::MIN,
                i32::MAX,
                sext32,
            )),
            FpOp::ToU32 => Some(saturate(
                soft32(ua).to_u32(true, srm, Some(&mut st)),
                nan,
                neg,
                0,
                u32::MAX,
                |v| sext32(v as i32),
            )),
            FpOp::ToI64 => Some(saturate(
                soft32(ua).to_i64(true, srm, Some(&mut st)),
                nan,
                neg,
                i64::MIN,
                i64::MAX,
                |v| v as u64,
            )),
            FpOp::ToU64 => Some(saturate(
                soft32(ua).to_u64(true, srm, Some(&mut st)),
                nan,
                neg,
                0,
                u64::MAX,
                |v| v,
            )),
            _ => None,
        };
        if let Some(conv) = converted {
            return finish(conv, &st);
        }

        let result = match op {
            FpOp::Add => pack32(soft32(ua).add(&soft32(ub), srm, Some(&mut st))),
            FpOp::Sub => pack32(soft32(ua).sub(&soft32(ub), srm, Some(&mut st))),
            FpOp::Mul => pack32(soft32(ua).mul(&soft32(ub), srm, Some(&mut st))),
            FpOp::Div => pack32(soft32(ua).div(&soft32(ub), srm, Some(&mut st))),
            FpOp::Sqrt => pack32(soft32(ua).sqrt(srm, Some(&mut st))),
            FpOp::MulAdd | FpOp::MulSub | FpOp::NegMulSub | FpOp::NegMulAdd => {
                let (x, z) = fused_signs(op, ua, uc, layout.sign);
                pack32(soft32(x).fused_mul_add(&soft32(ub), &soft32(z), srm, Some(&mut st)))
            }
            FpOp::Min | FpOp::Max => {
                let (r, f) = layout.min_max(ua, ub, op == FpOp::Max);
                extra |= f;
                box_f32(r as u32)
            }
            FpOp::SgnJ => box_f32(layout.inject_sign(ua, ub, false, false) as u32),
            FpOp::SgnJn => box_f32(layout.inject_sign(ua, ub, true, false) as u32),
            FpOp::SgnJx => box_f32(layout.inject_sign(ua, ub, false, true) as u32),
            FpOp::Eq => {
                let (r, f) = layout.equal(ua, ub);
                extra |= f;
                r
            }
            FpOp::Lt | FpOp::Le => {
                let (r, f) = layout.less(ua, ub, op == FpOp::Le);
                extra |= f;
                r
            }
            FpOp::Class => classify(layout, ua),
            FpOp::FromI32 => pack32(F32::from_i32(a as i32, srm, Some(&mut st))),
            FpOp::FromU32 => pack32(F32::from_u32(a as u32, srm, Some(&mut st))),
            FpOp::FromI64 => pack32(F32::from_i64(a as i64, srm, Some(&mut st))),
            FpOp::FromU64 => pack32(F32::from_u64(a, srm, Some(&mut st))),
            FpOp::Convert => pack32(F32::convert_from_float(&soft64(a), srm, Some(&mut st))),
            FpOp::MoveToInt => sext32(a as u32 as i32),
            FpOp::MoveFromInt => box_f32(a as u32),
            FpOp::ToI32 | FpOp::ToU32 | FpOp::ToI64 | FpOp::ToU64 => 0,
        };
        (result, FpFlags::from(st.status_flags) | extra)
    }

    /// Executes a double-precision operation.
    ///
    /// Operands are raw 64-bit register values. `Convert` widens a NaN-boxed
    /// single in `a` (`fcvt.d.s`).
    ///
    /// # Returns
    ///
    /// `(result, flags)`, with integer results sign-extended as for
    /// [`Fpu::execute_f32`].
    pub fn execute_f64(op: FpOp, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let layout = &F64_LAYOUT;
        let srm = Some(rm.to_soft());
        let mut st = FPState::default();
        let mut extra = FpFlags::NONE;
        let nan = layout.is_nan(a);
        let neg = layout.is_negative(a);

        let converted = match op {
            FpOp::ToI32 => Some(saturate(
                soft64(a).to_i32(true, srm, Some(&mut st)),
                nan,
                neg,
                i32::MIN,
                i32::MAX,
                sext32,
            )),
            FpOp::ToU32 => Some(saturate(
                soft64(a).to_u32(true, srm, Some(&mut st)),
                nan,
                neg,
                0,
                u32::MAX,
                |v| sext32(v as i32),
            )),
            FpOp::ToI64 => Some(saturate(
                soft64(a).to_i64(true, srm, Some(&mut st)),
                nan,
                neg,
                i64::MIN,
                i64::MAX,
                |v| v as u64,
            )),
            FpOp::ToU64 => Some(saturate(
                soft64(a).to_u64(true, srm, Some(&mut st)),
                nan,
                neg,
                0,
                u64::MAX,
                |v| v,
            )),
            _ => None,
        };
        if let Some(conv) = converted {
            return finish(conv, &st);
        }

        let result = match op {
            FpOp::Add => pack64(soft64(a).add(&soft64(b), srm, Some(&mut st))),
            FpOp::Sub => pack64(soft64(a).sub(&soft64(b), srm, Some(&mut st))),
            FpOp::Mul => pack64(soft64(a).mul(&soft64(b), srm, Some(&mut st))),
            FpOp::Div => pack64(soft64(a).div(&soft64(b), srm, Some(&mut st))),
            FpOp::Sqrt => pack64(soft64(a).sqrt(srm, Some(&mut st))),
            FpOp::MulAdd | FpOp::MulSub | FpOp::NegMulSub | FpOp::NegMulAdd => {
                let (x, z) = fused_signs(op, a, c, layout.sign);
                pack64(soft64(x).fused_mul_add(&soft64(b), &soft64(z), srm, Some(&mut st)))
            }
            FpOp::Min | FpOp::Max => {
                let (r, f) = layout.min_max(a, b, op == FpOp::Max);
                extra |= f;
                r
            }
            FpOp::SgnJ => layout.inject_sign(a, b, false, false),
            FpOp::SgnJn => layout.inject_sign(a, b, true, false),
            FpOp::SgnJx => layout.inject_sign(a, b, false, true),
            FpOp::Eq => {
                let (r, f) = layout.equal(a, b);
                extra |= f;
                r
            }
            FpOp::Lt | FpOp::Le => {
                let (r, f) = layout.less(a, b, op == FpOp::Le);
                extra |= f;
                r
            }
            FpOp::Class => classify(layout, a),
            FpOp::FromI32 => pack64(F64::from_i32(a as i32, srm, Some(&mut st))),
            FpOp::FromU32 => pack64(F64::from_u32(a as u32, srm, Some(&mut st))),
            FpOp::FromI64 => pack64(F64::from_i64(a as i64, srm, Some(&mut st))),
            FpOp::FromU64 => pack64(F64::from_u64(a, srm, Some(&mut st))),
            FpOp::Convert => {
                let single = soft32(u64::from(unbox_f32(a)));
                pack64(F64::convert_from_float(&single, srm, Some(&mut st)))
            }
            FpOp::MoveToInt | FpOp::MoveFromInt => a,
            FpOp::ToI32 | FpOp::ToU32 | FpOp::ToI64 | FpOp::ToU64 => 0,
        };
        (result, FpFlags::from(st.status_flags) | extra)
    }
}

/// Applies the operand negations of the fused family: returns `(a', c')` such that
/// the result is `a' * b + c'`.
const fn fused_signs(op: FpOp, a: u64, c: u64, sign: u64) -> (u64, u64) {
    match op {
        FpOp::MulSub => (a, c ^ sign),
        FpOp::NegMulSub => (a ^ sign, c),
        FpOp::NegMulAdd => (a ^ sign, c ^ sign),
        _ => (a, c),
    }
}

/// Merges conversion flags: an invalid conversion raises NV alone.
fn finish(conv: Converted, st: &FPState) -> (u64, FpFlags) {
    if conv.invalid {
        (conv.value, FpFlags::NV)
    } else {
        (conv.value, FpFlags::from(st.status_flags))
    }
}
