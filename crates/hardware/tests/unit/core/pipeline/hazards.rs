//! Hazard Detection and Forwarding Tests.
//!
//! Latches are built by hand so each decision is checked in isolation from
//! the rest of the pipeline.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvss_core::core::control::ControlDecoder;
use rvss_core::core::pipeline::hazards::{ForwardSource, ForwardingUnit, HazardDetectionUnit};
use rvss_core::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb, PipelineRegisters};

use crate::common::builder::instruction::inst;

fn decoding(word: u32) -> IfId {
    IfId {
        valid: true,
        pc: 8,
        word,
    }
}

fn executing(word: u32) -> IdEx {
    IdEx {
        valid: true,
        pc: 4,
        word,
        rd: ((word >> 7) & 0x1F) as usize,
        ctrl: ControlDecoder::control_signals(word),
        op: ControlDecoder::alu_signal(word),
        ..IdEx::default()
    }
}

fn in_mem(word: u32, alu_result: u64) -> ExMem {
    ExMem {
        valid: true,
        word,
        rd: ((word >> 7) & 0x1F) as usize,
        alu_result,
        ctrl: ControlDecoder::control_signals(word),
        ..ExMem::default()
    }
}

fn in_wb(word: u32, alu_result: u64, load_data: u64) -> MemWb {
    MemWb {
        valid: true,
        word,
        rd: ((word >> 7) & 0x1F) as usize,
        alu_result,
        load_data,
        ctrl: ControlDecoder::control_signals(word),
        ..MemWb::default()
    }
}

#[rstest]
#[case::rs1_dependency(inst().add(3, 1, 4).build(), true)]
#[case::rs2_dependency(inst().add(3, 4, 1).build(), true)]
#[case::store_data(inst().sw(2, 1, 0).build(), true)]
#[case::branch_operand(inst().beq(1, 0, 8).build(), true)]
#[case::independent(inst().add(3, 4, 5).build(), false)]
#[case::immediate_only(inst().lui(1, 3).build(), false)]
#[case::fp_source_is_not_integer(inst().fadd_s(3, 1, 1).build(), false)]
fn load_use_detection(#[case] consumer: u32, #[case] stalls: bool) {
    let load = executing(inst().lw(1, 2, 0).build());
    assert_eq!(
        HazardDetectionUnit::detect_load_use_hazard(&load, &decoding(consumer)),
        stalls
    );
}

#[test]
fn load_into_x0_never_stalls() {
    let load = executing(inst().lw(0, 2, 0).build());
    let consumer = decoding(inst().add(3, 0, 0).build());
    assert!(!HazardDetectionUnit::detect_load_use_hazard(&load, &consumer));
}

#[test]
fn alu_producer_is_forwarded_not_stalled() {
    let latches = PipelineRegisters {
        if_id: decoding(inst().add(3, 1, 1).build()),
        id_ex: executing(inst().addi(1, 0, 5).build()),
        ..PipelineRegisters::default()
    };
    assert!(!HazardDetectionUnit::should_stall(&latches, true, true));
    assert!(HazardDetectionUnit::should_stall(&latches, true, false));
    assert!(!HazardDetectionUnit::should_stall(&latches, false, false));
}

#[test]
fn without_forwarding_mem_stage_producer_stalls() {
    let consumer = decoding(inst().add(3, 1, 1).build());
    let producer = in_mem(inst().addi(1, 0, 5).build(), 5);
    assert!(HazardDetectionUnit::detect_data_hazard(
        &consumer,
        &IdEx::default(),
        &producer
    ));
}

#[test]
fn ecall_waits_for_older_instructions() {
    let mut latches = PipelineRegisters {
        if_id: decoding(inst().ecall().build()),
        ex_mem: in_mem(inst().addi(17, 0, 10).build(), 10),
        ..PipelineRegisters::default()
    };
    assert!(HazardDetectionUnit::detect_serialization(&latches));
    assert!(HazardDetectionUnit::should_stall(&latches, false, true));

    latches.ex_mem = ExMem::default();
    assert!(!HazardDetectionUnit::detect_serialization(&latches));
}

#[test]
fn youngest_producer_wins() {
    let ex_mem = in_mem(inst().addi(1, 0, 7).build(), 7);
    let mem_wb = in_wb(inst().addi(1, 0, 3).build(), 3, 0);
    assert_eq!(
        ForwardingUnit::forward(Some(1), 0, &ex_mem, &mem_wb),
        (7, ForwardSource::ExMem)
    );
}

#[test]
fn mem_wb_forwards_loaded_value() {
    let mem_wb = in_wb(inst().lw(1, 2, 0).build(), 0x1000_0000, 42);
    assert_eq!(
        ForwardingUnit::forward(Some(1), 0, &ExMem::default(), &mem_wb),
        (42, ForwardSource::MemWb)
    );
}

#[test]
fn load_in_mem_does_not_forward_its_address() {
    let ex_mem = in_mem(inst().lw(1, 2, 0).build(), 0x1000_0000);
    assert_eq!(ex_mem.forward_value(), None);
    assert_eq!(
        ForwardingUnit::forward(Some(1), 9, &ex_mem, &MemWb::default()),
        (9, ForwardSource::RegisterFile)
    );
}

#[rstest]
#[case::no_source(None)]
#[case::x0(Some(0))]
#[case::unrelated(Some(5))]
fn register_file_value_when_not_forwarded(#[case] source: Option<usize>) {
    let ex_mem = in_mem(inst().addi(1, 0, 7).build(), 7);
    let mem_wb = in_wb(inst().addi(2, 0, 3).build(), 3, 0);
    assert_eq!(
        ForwardingUnit::forward(source, 11, &ex_mem, &mem_wb),
        (11, ForwardSource::RegisterFile)
    );
}

#[test]
fn store_in_mem_does_not_forward() {
    let ex_mem = in_mem(inst().sw(2, 1, 0).build(), 0x1000_0000);
    assert_eq!(ex_mem.forward_value(), None);
}
