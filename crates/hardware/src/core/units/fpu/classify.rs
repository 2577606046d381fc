//! `FCLASS` classification.
//!
//! Produces the 10-bit one-hot class mask written to `rd`:
//!
//! | Bit | Class              |
//! |-----|--------------------|
//! |  0  | −∞                 |
//! |  1  | negative normal    |
//! |  2  | negative subnormal |
//! |  3  | −0                 |
//! |  4  | +0                 |
//! |  5  | positive subnormal |
//! |  6  | positive normal    |
//! |  7  | +∞                 |
//! |  8  | signaling NaN      |
//! |  9  | quiet NaN          |

use super::nan_handling::Layout;

/// Negative infinity.
pub const CLASS_NEG_INF: u64 = 1 << 0;
/// Negative normal number.
pub const CLASS_NEG_NORMAL: u64 = 1 << 1;
/// Negative subnormal number.
pub const CLASS_NEG_SUBNORMAL: u64 = 1 << 2;
/// Negative zero.
pub const CLASS_NEG_ZERO: u64 = 1 << 3;
/// Positive zero.
pub const CLASS_POS_ZERO: u64 = 1 << 4;
/// Positive subnormal number.
pub const CLASS_POS_SUBNORMAL: u64 = 1 << 5;
/// Positive normal number.
pub const CLASS_POS_NORMAL: u64 = 1 << 6;
/// Positive infinity.
pub const CLASS_POS_INF: u64 = 1 << 7;
/// Signaling NaN.
pub const CLASS_SNAN: u64 = 1 << 8;
/// Quiet NaN.
pub const CLASS_QNAN: u64 = 1 << 9;

/// Classifies raw bits according to `layout`.
pub const fn classify(layout: &Layout, bits: u64) -> u64 {
    let negative = layout.is_negative(bits);
    let exponent = bits & layout.exponent;
    let fraction = bits & layout.fraction;

    if exponent == layout.exponent {
        return match (fraction == 0, fraction & layout.quiet != 0, negative) {
            (true, _, true) => CLASS_NEG_INF,
            (true, _, false) => CLASS_POS_INF,
            (false, true, _) => CLASS_QNAN,
            (false, false, _) => CLASS_SNAN,
        };
    }

    match (exponent == 0, fraction == 0, negative) {
        (true, true, true) => CLASS_NEG_ZERO,
        (true, true, false) => CLASS_POS_ZERO,
        (true, false, true) => CLASS_NEG_SUBNORMAL,
        (true, false, false) => CLASS_POS_SUBNORMAL,
        (false, _, true) => CLASS_NEG_NORMAL,
        (false, _, false) => CLASS_POS_NORMAL,
    }
}
