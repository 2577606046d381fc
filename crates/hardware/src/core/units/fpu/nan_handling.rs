//! NaN boxing, canonical NaN propagation, and bit-level FP helpers.
//!
//! RISC-V stores single-precision values in 64-bit registers using "NaN boxing":
//! the upper 32 bits must be all ones.
//!
//! - **Boxing** ([`box_f32`]): sets the upper 32 bits when writing a single result.
//! - **Unboxing** ([`unbox_f32`]): an improperly boxed register reads as the
//!   canonical NaN.
//! - **Canonicalization** ([`Layout::canonicalize`]): any NaN produced by an
//!   arithmetic operation becomes the canonical quiet NaN.
//! - **Min/Max/Compare:** RISC-V NaN rules (a single NaN operand loses to the
//!   number, `-0.0 < +0.0`, signaling NaNs raise invalid).

use super::exception_flags::FpFlags;

/// Canonical quiet NaN for single precision.
pub const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;

/// Canonical quiet NaN for double precision.
pub const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

/// Upper-32-bit mask used for NaN boxing.
const NAN_BOX_MASK: u64 = 0xFFFF_FFFF_0000_0000;

/// Boxes raw single-precision bits into a 64-bit register value.
#[inline]
pub const fn box_f32(bits: u32) -> u64 {
    bits as u64 | NAN_BOX_MASK
}

/// Unboxes a 64-bit register value to single-precision bits.
///
/// Returns the canonical NaN when the upper 32 bits are not all ones.
#[inline]
pub const fn unbox_f32(val: u64) -> u32 {
    if (val & NAN_BOX_MASK) == NAN_BOX_MASK {
        val as u32
    } else {
        CANONICAL_NAN_F32
    }
}

/// Field layout of an IEEE 754 binary format, operating on raw bits held in a `u64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Format width in bits (32 or 64).
    pub width: u32,
    /// Sign bit.
    pub sign: u64,
    /// Exponent field mask (in place).
    pub exponent: u64,
    /// Fraction field mask.
    pub fraction: u64,
    /// Most significant fraction bit (quiet-NaN bit).
    pub quiet: u64,
    /// Canonical quiet NaN.
    pub canonical_nan: u64,
}

/// Single-precision layout.
pub const F32_LAYOUT: Layout = Layout {
    width: 32,
    sign: 0x8000_0000,
    exponent: 0x7F80_0000,
    fraction: 0x007F_FFFF,
    quiet: 0x0040_0000,
    canonical_nan: CANONICAL_NAN_F32 as u64,
};

/// Double-precision layout.
pub const F64_LAYOUT: Layout = Layout {
    width: 64,
    sign: 0x8000_0000_0000_0000,
    exponent: 0x7FF0_0000_0000_0000,
    fraction: 0x000F_FFFF_FFFF_FFFF,
    quiet: 0x0008_0000_0000_0000,
    canonical_nan: CANONICAL_NAN_F64,
};

impl Layout {
    /// Any NaN.
    #[inline]
    pub const fn is_nan(&self, bits: u64) -> bool {
        bits & self.exponent == self.exponent && bits & self.fraction != 0
    }

    /// Signaling NaN (quiet bit clear).
    #[inline]
    pub const fn is_signaling(&self, bits: u64) -> bool {
        self.is_nan(bits) && bits & self.quiet == 0
    }

    /// Sign bit set.
    #[inline]
    pub const fn is_negative(&self, bits: u64) -> bool {
        bits & self.sign != 0
    }

    /// Either zero.
    #[inline]
    pub const fn is_zero(&self, bits: u64) -> bool {
        bits & !self.sign == 0
    }

    /// Replaces any NaN with the canonical quiet NaN.
    #[inline]
    pub const fn canonicalize(&self, bits: u64) -> u64 {
        if self.is_nan(bits) { self.canonical_nan } else { bits }
    }

    /// Numeric value widened to `f64` (exact for both formats).
    #[inline]
    pub fn value(&self, bits: u64) -> f64 {
        if self.width == 32 {
            f64::from(f32::from_bits(bits as u32))
        } else {
            f64::from_bits(bits)
        }
    }

    /// Sign injection: magnitude of `a` with a sign derived from `b`.
    ///
    /// `negate` selects `fsgnjn`, `xor` selects `fsgnjx`; neither is `fsgnj`.
    pub const fn inject_sign(&self, a: u64, b: u64, negate: bool, xor: bool) -> u64 {
        let magnitude = a & !self.sign;
        let sign = if xor {
            (a ^ b) & self.sign
        } else if negate {
            !b & self.sign
        } else {
            b & self.sign
        };
        magnitude | sign
    }

    /// `fmin`/`fmax` with RISC-V NaN and signed-zero rules.
    ///
    /// A single NaN operand yields the other operand, two NaNs yield the canonical
    /// NaN, and `-0.0` orders below `+0.0`. Signaling NaN inputs raise NV.
    pub fn min_max(&self, a: u64, b: u64, max: bool) -> (u64, FpFlags) {
        let flags = if self.is_signaling(a) || self.is_signaling(b) {
            FpFlags::NV
        } else {
            FpFlags::NONE
        };
        let result = match (self.is_nan(a), self.is_nan(b)) {
            (true, true) => self.canonical_nan,
            (true, false) => b,
            (false, true) => a,
            (false, false) if self.is_zero(a) && self.is_zero(b) => {
                if max { a & b } else { a | b }
            }
            (false, false) => {
                let a_first = if max {
                    self.value(a) >= self.value(b)
                } else {
                    self.value(a) <= self.value(b)
                };
                if a_first { a } else { b }
            }
        };
        (result, flags)
    }

    /// `feq`: quiet comparison, NV only for signaling NaNs.
    pub fn equal(&self, a: u64, b: u64) -> (u64, FpFlags) {
        let flags = if self.is_signaling(a) || self.is_signaling(b) {
            FpFlags::NV
        } else {
            FpFlags::NONE
        };
        if self.is_nan(a) || self.is_nan(b) {
            return (0, flags);
        }
        (u64::from(self.value(a) == self.value(b)), flags)
    }

    /// `flt` (`or_equal == false`) or `fle`: signaling comparison, NV for any NaN.
    pub fn less(&self, a: u64, b: u64, or_equal: bool) -> (u64, FpFlags) {
        if self.is_nan(a) || self.is_nan(b) {
            return (0, FpFlags::NV);
        }
        let (va, vb) = (self.value(a), self.value(b));
        let result = if or_equal { va <= vb } else { va < vb };
        (u64::from(result), FpFlags::NONE)
    }
}
