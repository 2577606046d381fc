//! Control Decoder Tests.
//!
//! The two decode phases: opcode-derived stage enables and table-driven ALU
//! operation selection, plus the integer source analysis used by the hazard unit.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvss_core::config::IsaMode;
use rvss_core::core::control::ControlDecoder;
use rvss_core::core::pipeline::signals::{AluOp, ControlSignals, FpOp};

use crate::common::builder::instruction::inst;

#[test]
fn r_type_writes_register_from_alu() {
    let ctrl = ControlDecoder::control_signals(inst().add(3, 1, 2).build());
    assert_eq!(
        ctrl,
        ControlSignals {
            reg_write: true,
            ..ControlSignals::default()
        }
    );
}

#[test]
fn load_and_store_enables() {
    let load = ControlDecoder::control_signals(inst().lw(5, 2, 8).build());
    assert!(load.mem_read && load.mem_to_reg && load.reg_write && load.alu_src);

    let store = ControlDecoder::control_signals(inst().sw(2, 5, 8).build());
    assert!(store.mem_write && store.alu_src);
    assert!(!store.reg_write && !store.mem_read);
}

#[test]
fn control_transfers_set_branch() {
    let beq = ControlDecoder::control_signals(inst().beq(1, 2, 8).build());
    assert!(beq.branch && !beq.reg_write);

    let jal = ControlDecoder::control_signals(inst().jal(1, 8).build());
    assert!(jal.branch && jal.reg_write);

    let jalr = ControlDecoder::control_signals(inst().jalr(1, 5, 0).build());
    assert!(jalr.branch && jalr.reg_write && jalr.alu_src);
}

#[test]
fn unknown_opcode_has_no_enables() {
    assert_eq!(ControlDecoder::control_signals(0xFFFF_FFFF), ControlSignals::default());
    assert_eq!(ControlDecoder::alu_signal(0xFFFF_FFFF), AluOp::Nop);
    assert_eq!(ControlDecoder::alu_signal(0), AluOp::Nop);
}

#[rstest]
#[case::add(inst().add(3, 1, 2).build(), AluOp::Add)]
#[case::sub(inst().sub(3, 1, 2).build(), AluOp::Sub)]
#[case::mul(inst().mul(3, 1, 2).build(), AluOp::Mul)]
#[case::divu(inst().divu(3, 1, 2).build(), AluOp::Divu)]
#[case::addw(inst().addw(3, 1, 2).build(), AluOp::Addw)]
#[case::srai(inst().srai(3, 1, 40).build(), AluOp::Sra)]
#[case::srli(inst().srli(3, 1, 40).build(), AluOp::Srl)]
#[case::lui(inst().lui(3, 0x12345).build(), AluOp::Lui)]
#[case::blt(inst().blt(1, 2, 8).build(), AluOp::Slt)]
#[case::bgeu(inst().bgeu(1, 2, 8).build(), AluOp::Sltu)]
#[case::fadd_s(inst().fadd_s(1, 2, 3).build(), AluOp::Float(FpOp::Add))]
#[case::fadd_d(inst().fadd_d(1, 2, 3).build(), AluOp::Double(FpOp::Add))]
#[case::feq_s(inst().feq_s(1, 2, 3).build(), AluOp::Float(FpOp::Eq))]
#[case::fmin_s(inst().fmin_s(1, 2, 3).build(), AluOp::Float(FpOp::Min))]
#[case::fmadd_s(inst().fmadd_s(1, 2, 3, 4).build(), AluOp::Float(FpOp::MulAdd))]
#[case::fcvt_d_l(inst().fcvt_d_l(1, 2).build(), AluOp::Double(FpOp::FromI64))]
fn alu_signal_from_table(#[case] word: u32, #[case] expected: AluOp) {
    assert_eq!(ControlDecoder::alu_signal(word), expected);
}

#[test]
fn rv64_only_encodings_are_unsupported_in_rv32() {
    let ld = inst().ld(1, 2, 0).build();
    assert!(ControlDecoder::is_supported(ld, IsaMode::Rv64));
    assert!(!ControlDecoder::is_supported(ld, IsaMode::Rv32));
    assert!(ControlDecoder::requires_rv64(ld, IsaMode::Rv32));
    assert!(!ControlDecoder::requires_rv64(ld, IsaMode::Rv64));

    let lw = inst().lw(1, 2, 0).build();
    assert!(ControlDecoder::is_supported(lw, IsaMode::Rv32));
    assert!(!ControlDecoder::requires_rv64(lw, IsaMode::Rv32));

    assert!(!ControlDecoder::is_supported(0xFFFF_FFFF, IsaMode::Rv64));
}

#[rstest]
#[case::r_type(inst().add(3, 1, 2).build(), (Some(1), Some(2)))]
#[case::i_type(inst().addi(3, 1, -1).build(), (Some(1), None))]
#[case::store(inst().sw(4, 5, 0).build(), (Some(4), Some(5)))]
#[case::branch(inst().beq(6, 7, 8).build(), (Some(6), Some(7)))]
#[case::lui(inst().lui(3, 1).build(), (None, None))]
#[case::jal(inst().jal(1, 8).build(), (None, None))]
#[case::fp_load(inst().flw(1, 2, 0).build(), (Some(2), None))]
#[case::fp_arith(inst().fadd_s(1, 2, 3).build(), (None, None))]
#[case::fp_from_int(inst().fmv_w_x(1, 9).build(), (Some(9), None))]
#[case::csr_reg(inst().csrrw(1, 0x001, 7).build(), (Some(7), None))]
#[case::csr_imm(inst().csrrwi(1, 0x001, 7).build(), (None, None))]
#[case::ecall(inst().ecall().build(), (None, None))]
fn integer_sources(#[case] word: u32, #[case] expected: (Option<usize>, Option<usize>)) {
    assert_eq!(ControlDecoder::int_sources(word), expected);
}
