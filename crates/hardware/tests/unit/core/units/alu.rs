//! ALU Tests.
//!
//! Deterministic edge cases for the integer ALU in both register widths:
//!   - Signed overflow reporting for add/sub/mul and `MIN / -1`
//!   - Division and remainder by zero, which yield `(0, false)` in this simulator
//!     rather than the architectural all-ones / dividend results
//!   - Shift-amount masking and 32-bit sign extension

use proptest::prelude::*;
use rstest::rstest;
use rvss_core::core::pipeline::signals::AluOp;
use rvss_core::core::units::alu::Alu;

const NEG1: u64 = -1i64 as u64;
const I64_MAX: u64 = i64::MAX as u64;
const I64_MIN: u64 = i64::MIN as u64;
const I32_MIN: u64 = i32::MIN as i64 as u64;

fn sext32(val: u32) -> u64 {
    val as i32 as i64 as u64
}

// ─── Overflow ────────────────────────────────────────────────────────────────

#[test]
fn add_reports_signed_overflow() {
    assert_eq!(Alu::execute(AluOp::Add, I64_MAX, 1), (I64_MIN, true));
}

#[test]
fn add_without_overflow() {
    assert_eq!(Alu::execute(AluOp::Add, 100, 200), (300, false));
    assert_eq!(Alu::execute(AluOp::Add, NEG1, 1), (0, false));
}

#[test]
fn sub_reports_signed_overflow() {
    assert_eq!(Alu::execute(AluOp::Sub, I64_MIN, 1), (I64_MAX, true));
    assert_eq!(Alu::execute(AluOp::Sub, 5, 7), (-2i64 as u64, false));
}

#[test]
fn mul_reports_signed_overflow() {
    let (_, overflow) = Alu::execute(AluOp::Mul, I64_MAX, 2);
    assert!(overflow);
    assert_eq!(Alu::execute(AluOp::Mul, 6, 7), (42, false));
}

#[test]
fn div_min_by_minus_one_overflows() {
    assert_eq!(Alu::execute(AluOp::Div, I64_MIN, NEG1), (I64_MIN, true));
    assert_eq!(Alu::execute(AluOp::Rem, I64_MIN, NEG1), (0, true));
}

// ─── Division by zero ────────────────────────────────────────────────────────

#[rstest]
#[case::div(AluOp::Div)]
#[case::divu(AluOp::Divu)]
#[case::rem(AluOp::Rem)]
#[case::remu(AluOp::Remu)]
#[case::divw(AluOp::Divw)]
#[case::divuw(AluOp::Divuw)]
#[case::remw(AluOp::Remw)]
#[case::remuw(AluOp::Remuw)]
fn division_by_zero_yields_zero_without_overflow(#[case] op: AluOp) {
    for dividend in [0, 1, 42, NEG1, I64_MIN, I64_MAX] {
        assert_eq!(Alu::execute(op, dividend, 0), (0, false), "{op:?} {dividend:#x}");
    }
}

proptest! {
    #[test]
    fn divu_by_zero_is_always_zero(x in any::<u64>()) {
        prop_assert_eq!(Alu::execute(AluOp::Divu, x, 0), (0, false));
    }

    #[test]
    fn add_matches_wrapping_add(a in any::<u64>(), b in any::<u64>()) {
        let (result, overflow) = Alu::execute(AluOp::Add, a, b);
        prop_assert_eq!(result, a.wrapping_add(b));
        prop_assert_eq!(overflow, (a as i64).checked_add(b as i64).is_none());
    }
}

#[test]
fn signed_division_truncates_toward_zero() {
    assert_eq!(Alu::execute(AluOp::Div, -7i64 as u64, 2).0, -3i64 as u64);
    assert_eq!(Alu::execute(AluOp::Rem, -7i64 as u64, 2).0, -1i64 as u64);
    assert_eq!(Alu::execute(AluOp::Divu, NEG1, 2).0, u64::MAX / 2);
}

// ─── Multiply high ───────────────────────────────────────────────────────────

#[test]
fn mulh_variants() {
    assert_eq!(Alu::execute(AluOp::Mulh, NEG1, NEG1).0, 0);
    assert_eq!(Alu::execute(AluOp::Mulhu, NEG1, NEG1).0, u64::MAX - 1);
    assert_eq!(Alu::execute(AluOp::Mulhsu, NEG1, 2).0, NEG1);
}

// ─── Logic, compare, shifts ──────────────────────────────────────────────────

#[rstest]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Slt, NEG1, 1, 1)]
#[case(AluOp::Sltu, NEG1, 1, 0)]
#[case(AluOp::Lui, 0xDEAD, 0x1234_5000, 0x1234_5000)]
#[case(AluOp::Sll, 1, 63, 1 << 63)]
#[case(AluOp::Sll, 1, 64, 1)]
#[case(AluOp::Srl, I64_MIN, 63, 1)]
#[case(AluOp::Sra, I64_MIN, 63, NEG1)]
fn logic_and_shift_vectors(#[case] op: AluOp, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    assert_eq!(Alu::execute(op, a, b), (expected, false));
}

#[test]
fn nop_and_float_ops_produce_zero() {
    assert_eq!(Alu::execute(AluOp::Nop, 5, 6), (0, false));
}

// ─── Word operations ─────────────────────────────────────────────────────────

#[test]
fn word_ops_sign_extend_bit_31() {
    assert_eq!(Alu::execute(AluOp::Addw, 0x7FFF_FFFF, 1), (I32_MIN, true));
    assert_eq!(Alu::execute(AluOp::Sllw, 1, 31).0, sext32(0x8000_0000));
    assert_eq!(Alu::execute(AluOp::Sllw, 1, 32).0, 1);
    assert_eq!(Alu::execute(AluOp::Sraw, 0x8000_0000, 31).0, NEG1);
    assert_eq!(Alu::execute(AluOp::Srlw, 0x8000_0000, 31).0, 1);
}

#[test]
fn rv32_maps_full_width_ops_to_word_semantics() {
    assert_eq!(Alu::execute_rv32(AluOp::Add, 0x7FFF_FFFF, 1), (I32_MIN, true));
    assert_eq!(Alu::execute_rv32(AluOp::Sll, 1, 33).0, 2);
    // 0xFFFF_FFFF is -1 in 32-bit signed compare
    assert_eq!(Alu::execute_rv32(AluOp::Slt, 0xFFFF_FFFF, 0).0, 1);
    assert_eq!(Alu::execute_rv32(AluOp::Sltu, 0xFFFF_FFFF, 0).0, 0);
    assert_eq!(Alu::execute_rv32(AluOp::Mulhu, 0xFFFF_FFFF, 0xFFFF_FFFF).0, sext32(0xFFFF_FFFE));
    assert_eq!(Alu::execute_rv32(AluOp::Divu, 7, 0), (0, false));
}
