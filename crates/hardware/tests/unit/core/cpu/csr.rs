//! CSR Instruction Tests.

use pretty_assertions::assert_eq;
use rvss_core::core::arch::csr::{CYCLE, FCSR, FFLAGS, FRM, INSTRET};

use crate::common::builder::instruction::inst;
use crate::common::harness::TestContext;

#[test]
fn csrrw_swaps_values() {
    let mut ctx = TestContext::new().load_program(&[
        inst().csrrw(2, u32::from(FCSR), 1).build(),
        inst().csrrw(3, u32::from(FCSR), 0).build(),
    ]);
    ctx.set_reg(1, 0b101_00011);
    let _ = ctx.run();

    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.get_reg(3), 0b101_00011);
    assert_eq!(ctx.read_csr(u64::from(FCSR)), 0);
}

#[test]
fn set_and_clear_bits() {
    let mut ctx = TestContext::new().load_program(&[
        inst().csrrs(0, u32::from(FFLAGS), 1).build(),
        inst().csrrc(2, u32::from(FFLAGS), 3).build(),
        inst().csrrs(4, u32::from(FFLAGS), 0).build(),
    ]);
    ctx.set_reg(1, 0b1_0101);
    ctx.set_reg(3, 0b0_0001);
    let _ = ctx.run();

    assert_eq!(ctx.get_reg(2), 0b1_0101);
    assert_eq!(ctx.get_reg(4), 0b1_0100);
}

#[test]
fn frm_and_fflags_are_views_of_fcsr() {
    let mut ctx = TestContext::new().load_program(&[
        inst().csrrwi(0, u32::from(FRM), 0b011).build(),
        inst().csrrwi(0, u32::from(FFLAGS), 0b0_0110).build(),
    ]);
    let _ = ctx.run();
    assert_eq!(ctx.read_csr(u64::from(FCSR)), 0b011_00110);
    assert_eq!(ctx.read_csr(u64::from(FRM)), 0b011);
}

#[test]
fn counters_track_statistics() {
    let mut ctx = TestContext::new().load_program(&[
        inst().addi(1, 0, 1).build(),
        inst().addi(1, 1, 1).build(),
        inst().csrrs(5, u32::from(CYCLE), 0).build(),
        inst().csrrs(6, u32::from(INSTRET), 0).build(),
    ]);
    let _ = ctx.run();

    assert_eq!(ctx.get_reg(5), 2);
    assert_eq!(ctx.get_reg(6), 3);
    assert_eq!(ctx.read_csr(u64::from(CYCLE)), 4);
}

#[test]
fn counter_writes_are_ignored() {
    let mut ctx = TestContext::new().load_program(&[
        inst().addi(1, 0, 99).build(),
        inst().csrrw(2, u32::from(INSTRET), 1).build(),
    ]);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(2), 1);
    assert_eq!(ctx.read_csr(u64::from(INSTRET)), 2);
}

#[test]
fn fp_exceptions_accrue_in_fflags() {
    let mut ctx = TestContext::new().load_program(&[
        inst().fdiv_s(3, 1, 2).build(),
        inst().fadd_s(4, 1, 1).build(),
    ]);
    ctx.set_freg(1, 0xFFFF_FFFF_3F80_0000);
    ctx.set_freg(2, 0xFFFF_FFFF_0000_0000);
    let _ = ctx.run();
    // DZ from the division survives the exact addition.
    assert_eq!(ctx.read_csr(u64::from(FFLAGS)), 0b0_1000);
}

#[test]
fn dynamic_rounding_follows_frm() {
    // 1 / 3 rounded toward zero and toward +inf differ in the last bit.
    let one = 0xFFFF_FFFF_3F80_0000;
    let three = 0xFFFF_FFFF_4040_0000;

    let mut down = TestContext::new().load_program(&[
        inst().csrrwi(0, u32::from(FRM), 0b001).build(),
        inst().fdiv_s(3, 1, 2).build(),
    ]);
    down.set_freg(1, one);
    down.set_freg(2, three);
    let _ = down.run();

    let mut up = TestContext::new().load_program(&[
        inst().csrrwi(0, u32::from(FRM), 0b011).build(),
        inst().fdiv_s(3, 1, 2).build(),
    ]);
    up.set_freg(1, one);
    up.set_freg(2, three);
    let _ = up.run();

    assert_eq!(up.get_freg(3) - down.get_freg(3), 1);
    assert_eq!(up.read_csr(u64::from(FFLAGS)) & 1, 1);
}
