//! Single-Cycle Executor Tests.
//!
//! Drives the executor directly through the [`Executor`] trait to inspect its
//! journal.

use pretty_assertions::assert_eq;
use rvss_core::config::{Config, ExecutorKind};
use rvss_core::sim::Executor;
use rvss_core::sim::loader::AssembledProgram;
use rvss_core::sim::single_cycle::SingleCycleExecutor;

use crate::common::builder::instruction::inst;
use crate::common::harness::init_tracing;

fn executor(limit: Option<usize>) -> SingleCycleExecutor {
    init_tracing();
    let mut config = Config::default();
    config.general.undo_history_limit = limit;
    let mut exec = SingleCycleExecutor::new(config).unwrap();
    let _ = exec
        .load_program(AssembledProgram::from_words(vec![
            inst().addi(1, 0, 1).build(),
            inst().addi(2, 1, 1).build(),
            inst().addi(3, 2, 1).build(),
            inst().addi(4, 3, 1).build(),
        ]))
        .unwrap();
    exec
}

#[test]
fn kind_and_empty_pipeline() {
    let exec = executor(None);
    assert_eq!(exec.kind(), ExecutorKind::SingleCycle);
    assert!(exec.is_pipeline_empty());
}

#[test]
fn debug_steps_are_journaled() {
    let mut exec = executor(None);
    for _ in 0..3 {
        let _ = exec.debug_step().unwrap();
    }
    assert_eq!(exec.journal().undo_len(), 3);

    let last = exec.journal().last().unwrap();
    assert_eq!((last.old_pc, last.new_pc), (8, 12));
    assert_eq!(last.register_changes.len(), 1);
    assert_eq!(last.register_changes[0].new, 3);

    assert!(exec.undo().unwrap());
    assert_eq!(exec.journal().undo_len(), 2);
    assert_eq!(exec.journal().redo_len(), 1);
    assert_eq!(exec.cpu().regs.read_gpr(3).unwrap(), 0);
    assert_eq!(exec.cpu().stats.cycles, 2);
    assert_eq!(exec.cpu().stats.inst_alu, 2);
}

#[test]
fn new_step_after_undo_drops_redo() {
    let mut exec = executor(None);
    let _ = exec.debug_step().unwrap();
    let _ = exec.debug_step().unwrap();
    assert!(exec.undo().unwrap());
    let _ = exec.debug_step().unwrap();
    assert_eq!(exec.journal().redo_len(), 0);
    assert!(!exec.redo().unwrap());
    assert_eq!(exec.cpu().regs.read_gpr(2).unwrap(), 2);
}

#[test]
fn history_limit_bounds_undo() {
    let mut exec = executor(Some(2));
    let _ = exec.debug_run().unwrap();
    assert_eq!(exec.journal().undo_len(), 2);
    assert!(exec.undo().unwrap());
    assert!(exec.undo().unwrap());
    assert!(!exec.undo().unwrap());
    assert_eq!(exec.cpu().regs.pc(), 8);
    assert_eq!(exec.cpu().regs.read_gpr(2).unwrap(), 2);
    assert_eq!(exec.cpu().regs.read_gpr(3).unwrap(), 0);
}

#[test]
fn reset_clears_journal() {
    let mut exec = executor(None);
    let _ = exec.debug_step().unwrap();
    exec.reset().unwrap();
    assert_eq!(exec.journal().undo_len(), 0);
    assert_eq!(exec.cpu().regs.pc(), 0);
    assert_eq!(exec.cpu().regs.read_gpr(1).unwrap(), 0);
}
