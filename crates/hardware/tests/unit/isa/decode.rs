//! Immediate Decoding Tests.
//!
//! Checks each instruction format's immediate reassembly, including sign
//! extension at the format's top bit.

use proptest::prelude::*;
use rvss_core::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u, immediate, sign_extend};
use rvss_core::isa::instruction::InstructionBits;

use crate::common::builder::instruction::inst;

#[test]
fn sign_extend_from_arbitrary_width() {
    assert_eq!(sign_extend(0x800, 12), -2048);
    assert_eq!(sign_extend(0x7FF, 12), 2047);
    assert_eq!(sign_extend(0xFFFF_FFFF, 32), -1);
    assert_eq!(sign_extend(1, 1), -1);
}

#[test]
fn format_specific_immediates() {
    assert_eq!(imm_i(inst().addi(1, 2, -5).build()), -5);
    assert_eq!(imm_s(inst().sw(1, 2, -12).build()), -12);
    assert_eq!(imm_b(inst().beq(1, 2, -4096).build()), -4096);
    assert_eq!(imm_u(inst().lui(1, 0x80000).build()), -0x8000_0000);
    assert_eq!(imm_j(inst().jal(1, 0xF_FFFE).build()), 0xF_FFFE);
    assert_eq!(imm_j(inst().jal(1, -2).build()), -2);
}

#[test]
fn immediate_dispatches_on_opcode() {
    assert_eq!(immediate(inst().add(1, 2, 3).build()), 0);
    assert_eq!(immediate(inst().lw(1, 2, 100).build()), 100);
    assert_eq!(immediate(inst().sd(1, 2, -8).build()), -8);
    assert_eq!(immediate(inst().bne(1, 2, 16).build()), 16);
    assert_eq!(immediate(inst().auipc(1, 1).build()), 0x1000);
    assert_eq!(immediate(inst().jal(0, 2048).build()), 2048);
}

#[test]
fn field_extraction() {
    let word = inst().sub(7, 13, 31).build();
    assert_eq!(word.opcode(), 0b011_0011);
    assert_eq!(word.rd(), 7);
    assert_eq!(word.rs1(), 13);
    assert_eq!(word.rs2(), 31);
    assert_eq!(word.funct3(), 0);
    assert_eq!(word.funct7(), 0b010_0000);
}

proptest! {
    #[test]
    fn i_type_immediate_round_trips(imm in -2048i32..2048) {
        prop_assert_eq!(imm_i(inst().addi(1, 1, imm).build()), i64::from(imm));
    }

    #[test]
    fn b_type_offsets_are_even(half in -2048i32..2048) {
        let offset = half * 2;
        prop_assert_eq!(imm_b(inst().beq(1, 2, offset).build()), i64::from(offset));
    }
}
