//! Statistics Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvss_core::stats::{InstructionClass, STATS_SECTIONS, SimStats};

use crate::common::builder::instruction::inst;

#[rstest]
#[case(inst().add(1, 2, 3).build(), InstructionClass::Alu)]
#[case(inst().lui(1, 1).build(), InstructionClass::Alu)]
#[case(inst().lw(1, 2, 0).build(), InstructionClass::Load)]
#[case(inst().flw(1, 2, 0).build(), InstructionClass::Load)]
#[case(inst().sd(1, 2, 0).build(), InstructionClass::Store)]
#[case(inst().jalr(0, 1, 0).build(), InstructionClass::Branch)]
#[case(inst().ecall().build(), InstructionClass::System)]
#[case(inst().csrrs(1, 3, 0).build(), InstructionClass::System)]
#[case(inst().fmadd_s(1, 2, 3, 4).build(), InstructionClass::Float)]
fn classification(#[case] word: u32, #[case] class: InstructionClass) {
    assert_eq!(InstructionClass::of(word), class);
}

#[test]
fn retire_and_retract_are_inverse() {
    let mut stats = SimStats::default();
    stats.record_retire(InstructionClass::Load);
    stats.record_retire(InstructionClass::Float);
    assert_eq!((stats.instructions_retired, stats.inst_load, stats.inst_fp), (2, 1, 1));

    stats.retract_retire(InstructionClass::Load);
    assert_eq!((stats.instructions_retired, stats.inst_load, stats.inst_fp), (1, 0, 1));
}

#[test]
fn cpi_and_ipc() {
    let mut stats = SimStats::default();
    assert_eq!(stats.cpi(), 0.0);
    assert_eq!(stats.ipc(), 0.0);

    stats.cycles = 12;
    stats.instructions_retired = 8;
    assert_eq!(stats.cpi(), 1.5);
    assert!((stats.ipc() - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn report_selects_sections() {
    let mut stats = SimStats::default();
    stats.cycles = 10;
    stats.instructions_retired = 5;
    stats.stalls_data = 2;

    let summary = stats.report_sections(&["summary".to_owned()]);
    assert!(summary.contains("sim_cycles               10"));
    assert!(summary.contains("sim_cpi                  2.0000"));
    assert!(!summary.contains("HAZARDS"));

    let hazards = stats.report_sections(&["hazards".to_owned()]);
    assert!(hazards.contains("stalls.data            2 (20.00%)"));
    assert!(!hazards.contains("INSTRUCTION MIX"));

    let full = stats.to_string();
    assert_eq!(full, stats.report_sections(&[]));
    for section in ["sim_cycles", "INSTRUCTION MIX", "HAZARDS"] {
        assert!(full.contains(section));
    }
    assert_eq!(STATS_SECTIONS, ["summary", "instruction_mix", "hazards"]);
}

#[test]
fn serializes_to_json() {
    let stats = SimStats {
        cycles: 3,
        ..SimStats::default()
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["cycles"], 3);
    assert_eq!(json["flushes"], 0);
}
