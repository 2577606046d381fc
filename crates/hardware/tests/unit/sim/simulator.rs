//! Simulator Facade Tests.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvss_core::HaltReason;
use rvss_core::common::error::SimError;
use rvss_core::config::{ExecutorKind, IsaMode};
use rvss_core::sim::loader::AssembledProgram;

use crate::common::builder::instruction::inst;
use crate::common::harness::{TestContext, config};

fn sum_program() -> Vec<u32> {
    vec![
        inst().li(17, 10).build(),
        inst().addi(1, 0, 5).build(),
        inst().addi(2, 0, 7).build(),
        inst().add(3, 1, 2).build(),
        inst().ecall().build(),
    ]
}

fn context(executor: ExecutorKind) -> TestContext {
    TestContext::with_config(config(executor, IsaMode::Rv64))
}

#[rstest]
#[case(ExecutorKind::SingleCycle)]
#[case(ExecutorKind::Pipelined)]
fn executor_is_selected_by_config(#[case] executor: ExecutorKind) {
    let ctx = context(executor);
    assert_eq!(ctx.sim.kind(), executor);
    assert_eq!(ctx.sim.executor().kind(), executor);
}

#[rstest]
fn breakpoint_halts_before_instruction(
    #[values(ExecutorKind::SingleCycle, ExecutorKind::Pipelined)] executor: ExecutorKind,
) {
    let mut ctx = context(executor).load_program(&sum_program());
    let _ = ctx.sim.add_breakpoint(12).unwrap();

    assert_eq!(ctx.run(), HaltReason::Breakpoint(12));
    assert_eq!(ctx.pc(), 12);
    assert_eq!(ctx.get_reg(3), 0);

    // Resuming executes the instruction under the breakpoint.
    assert_eq!(ctx.run(), HaltReason::Exit(0));
    assert_eq!(ctx.get_reg(3), 12);
}

#[rstest]
fn instruction_limit_stops_run(
    #[values(ExecutorKind::SingleCycle, ExecutorKind::Pipelined)] executor: ExecutorKind,
) {
    let mut cfg = config(executor, IsaMode::Rv64);
    cfg.general.instruction_execution_limit = Some(3);
    let mut ctx = TestContext::with_config(cfg).load_program(&[
        inst().addi(1, 1, 1).build(),
        inst().jal(0, -4).build(),
    ]);

    assert_eq!(ctx.run(), HaltReason::InstructionLimit);
    assert!(ctx.sim.stats().instructions_retired >= 3);
    let retired = ctx.sim.stats().instructions_retired;
    assert_eq!(ctx.run(), HaltReason::InstructionLimit);
    assert!(ctx.sim.stats().instructions_retired > retired);
}

#[rstest]
fn stop_request_halts_run(
    #[values(ExecutorKind::SingleCycle, ExecutorKind::Pipelined)] executor: ExecutorKind,
) {
    let mut ctx = context(executor).load_program(&[inst().jal(0, 0).build()]);
    ctx.sim.request_stop();
    assert_eq!(ctx.run(), HaltReason::StopRequested);
    assert!(!ctx.sim.control().is_stop_requested());
}

#[test]
fn stop_from_another_thread_ends_infinite_loop() {
    let mut ctx = TestContext::new().load_program(&[inst().jal(0, 0).build()]);
    let control = ctx.sim.control();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        control.request_stop();
    });
    assert_eq!(ctx.run(), HaltReason::StopRequested);
    stopper.join().unwrap();
}

#[test]
fn line_breakpoints_map_through_program() {
    let program = AssembledProgram {
        text_buffer: sum_program(),
        line_to_instruction: BTreeMap::from([(10, 0), (14, 3)]),
        instruction_to_line: BTreeMap::from([(0, 10), (3, 14)]),
        ..AssembledProgram::default()
    };
    let mut ctx = TestContext::new().load(program);

    assert_eq!(ctx.sim.add_line_breakpoint(14).unwrap(), 12);
    assert!(ctx.cpu().breakpoints.contains(12));
    let err = ctx.sim.add_line_breakpoint(11).unwrap_err();
    assert!(matches!(err, SimError::UnknownLine(11)));
    assert!(!err.is_fatal());

    assert_eq!(ctx.run(), HaltReason::Breakpoint(12));
}

#[test]
fn line_breakpoints_are_removed_by_line() {
    let program = AssembledProgram {
        text_buffer: sum_program(),
        line_to_instruction: BTreeMap::from([(10, 0), (14, 3)]),
        instruction_to_line: BTreeMap::from([(0, 10), (3, 14)]),
        ..AssembledProgram::default()
    };
    let mut ctx = TestContext::new().load(program);
    let _ = ctx.sim.add_line_breakpoint(14).unwrap();

    assert!(ctx.sim.remove_line_breakpoint(14).unwrap());
    assert!(!ctx.cpu().breakpoints.contains(12));
    assert!(!ctx.sim.remove_line_breakpoint(14).unwrap());
    assert!(matches!(
        ctx.sim.remove_line_breakpoint(11),
        Err(SimError::UnknownLine(11))
    ));

    assert_eq!(ctx.run(), HaltReason::Exit(0));
    assert_eq!(ctx.get_reg(3), 12);
}

#[test]
fn clearing_and_removing_breakpoints() {
    let mut ctx = TestContext::new().load_program(&sum_program());
    assert!(ctx.sim.add_breakpoint(4).unwrap());
    assert!(ctx.sim.add_breakpoint(8).unwrap());
    assert!(ctx.sim.remove_breakpoint(4));
    assert!(!ctx.sim.remove_breakpoint(4));
    ctx.sim.clear_breakpoints();
    assert!(ctx.cpu().breakpoints.is_empty());
    assert_eq!(ctx.run(), HaltReason::Exit(0));
}

#[test]
fn misaligned_breakpoint_is_rejected() {
    let mut ctx = TestContext::new().load_program(&sum_program());
    assert!(matches!(
        ctx.sim.add_breakpoint(2),
        Err(SimError::MisalignedBreakpoint(2))
    ));
}

#[test]
fn breakpoints_survive_reset() {
    let mut ctx = TestContext::new().load_program(&sum_program());
    let _ = ctx.sim.add_breakpoint(8).unwrap();
    assert_eq!(ctx.run(), HaltReason::Breakpoint(8));
    ctx.sim.reset().unwrap();
    assert_eq!(ctx.pc(), 0);
    assert_eq!(ctx.run(), HaltReason::Breakpoint(8));
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = config(ExecutorKind::SingleCycle, IsaMode::Rv64);
    cfg.memory.block_size = 0;
    let err = rvss_core::Simulator::new(cfg).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)));
}

#[test]
fn stats_report_after_run() {
    let mut ctx = TestContext::new().load_program(&sum_program());
    let _ = ctx.run();
    let stats = ctx.sim.stats();
    assert_eq!(stats.inst_alu, 4);
    assert_eq!(stats.inst_system, 1);
    assert_eq!(stats.cpi(), 1.0);
}
