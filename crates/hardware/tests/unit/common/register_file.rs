//! Register File Tests.
//!
//! Covers the hard-wired zero register, XLEN truncation, index validation, reset
//! presets, and the `fflags`/`frm` views of `fcsr`.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rvss_core::common::error::SimError;
use rvss_core::common::reg::{RegisterClass, RegisterFile};
use rvss_core::config::{Config, IsaMode};
use rvss_core::core::arch::csr::{FCSR, FFLAGS, FRM};
use rvss_core::isa::abi::{REG_GP, REG_SP, REG_TP};

fn rv64() -> RegisterFile {
    RegisterFile::new(&Config::default())
}

fn rv32() -> RegisterFile {
    let mut config = Config::default();
    config.general.isa = IsaMode::Rv32;
    RegisterFile::new(&config)
}

proptest! {
    #[test]
    fn x0_always_reads_zero(val in any::<u64>()) {
        let mut regs = rv64();
        regs.write_gpr(0, val).unwrap();
        prop_assert_eq!(regs.read_gpr(0).unwrap(), 0);
    }

    #[test]
    fn other_gprs_hold_their_value(idx in 1usize..32, val in any::<u64>()) {
        let mut regs = rv64();
        regs.write_gpr(idx, val).unwrap();
        prop_assert_eq!(regs.read_gpr(idx).unwrap(), val);
    }
}

#[test]
fn rv32_truncates_gpr_writes_and_pc() {
    let mut regs = rv32();
    regs.write_gpr(5, 0xDEAD_BEEF_1234_5678).unwrap();
    assert_eq!(regs.read_gpr(5).unwrap(), 0x1234_5678);

    regs.set_pc(0x1_0000_0004);
    assert_eq!(regs.pc(), 4);
}

#[test]
fn out_of_range_indices_are_rejected() {
    let mut regs = rv64();
    assert!(matches!(
        regs.read_gpr(32),
        Err(SimError::InvalidRegister { class: RegisterClass::Gpr, index: 32 })
    ));
    assert!(matches!(
        regs.write_fpr(40, 0),
        Err(SimError::InvalidRegister { class: RegisterClass::Fpr, index: 40 })
    ));
    assert!(matches!(regs.read_csr(0x1000), Err(SimError::InvalidCsr(0x1000))));
}

#[test]
fn reset_presets_pointer_registers() {
    let config = Config::default();
    let mut regs = RegisterFile::new(&config);
    regs.write_gpr(REG_SP, 0).unwrap();
    regs.write_gpr(7, 99).unwrap();
    regs.set_pc(0x40);

    regs.reset();

    assert_eq!(regs.read_gpr(REG_SP).unwrap(), config.memory.stack_pointer);
    assert_eq!(regs.read_gpr(REG_GP).unwrap(), config.memory.global_pointer);
    assert_eq!(regs.read_gpr(REG_TP).unwrap(), config.memory.thread_pointer);
    assert_eq!(regs.read_gpr(7).unwrap(), 0);
    assert_eq!(regs.pc(), 0);
    assert_eq!(regs.read_csr(u64::from(FRM)).unwrap(), 0);
}

#[test]
fn fflags_and_frm_are_views_of_fcsr() {
    let mut regs = rv64();
    regs.write_csr(u64::from(FRM), 0b011).unwrap();
    regs.write_csr(u64::from(FFLAGS), 0b1_0001).unwrap();

    assert_eq!(regs.read_csr(u64::from(FCSR)).unwrap(), (0b011 << 5) | 0b1_0001);

    regs.write_csr(u64::from(FCSR), 0xFF).unwrap();
    assert_eq!(regs.read_csr(u64::from(FRM)).unwrap(), 0b111);
    assert_eq!(regs.read_csr(u64::from(FFLAGS)).unwrap(), 0b1_1111);
}

#[test]
fn generic_accessors_dispatch_by_class() {
    let mut regs = rv64();
    regs.write(RegisterClass::Fpr, 3, 0x4000_0000).unwrap();
    assert_eq!(regs.read(RegisterClass::Fpr, 3).unwrap(), 0x4000_0000);
    assert_eq!(regs.read_fpr(3).unwrap(), 0x4000_0000);

    regs.write(RegisterClass::Csr, 0x340, 7).unwrap();
    assert_eq!(regs.read_csr(0x340).unwrap(), 7);
}

#[test]
fn dump_lists_abi_names() {
    let mut regs = rv64();
    regs.write_gpr(10, 0x2A).unwrap();
    let dump = regs.dump();
    assert!(dump.contains("a0"));
    assert!(dump.contains("0x000000000000002a"));
    assert!(dump.contains("pc"));
}
