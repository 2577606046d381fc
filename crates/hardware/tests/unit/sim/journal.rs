//! Step Journal Tests.
//!
//! Stack discipline of the journal itself, then undo/redo through the
//! single-cycle executor restoring complete machine state.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rvss_core::common::reg::RegisterClass;
use rvss_core::core::arch::csr::{FCSR, FFLAGS, FRM};
use rvss_core::sim::journal::{RegisterChange, StepDelta, StepJournal};

use crate::common::builder::instruction::inst;
use crate::common::harness::TestContext;

fn delta(pc: u64) -> StepDelta {
    let mut delta = StepDelta::new(pc);
    delta.new_pc = pc + 4;
    delta.register_changes.push(RegisterChange {
        class: RegisterClass::Gpr,
        index: 1,
        old: pc,
        new: pc + 1,
    });
    delta
}

#[test]
fn pc_only_delta() {
    let mut step = StepDelta::new(0);
    step.new_pc = 4;
    assert!(step.is_pc_only());
    assert!(!delta(0).is_pc_only());
}

#[test]
fn push_invalidates_redo() {
    let mut journal = StepJournal::new(None);
    journal.push(delta(0));
    journal.push(delta(4));
    let undone = journal.pop_undo().unwrap();
    journal.push_redo(undone);
    assert_eq!(journal.redo_len(), 1);

    journal.push(delta(8));
    assert_eq!(journal.redo_len(), 0);
    assert_eq!(journal.undo_len(), 2);
    assert_eq!(journal.last().map(|d| d.old_pc), Some(8));
}

#[test]
fn history_limit_drops_oldest() {
    let mut journal = StepJournal::new(Some(2));
    for pc in [0, 4, 8] {
        journal.push(delta(pc));
    }
    assert_eq!(journal.undo_len(), 2);
    assert_eq!(journal.pop_undo().map(|d| d.old_pc), Some(8));
    assert_eq!(journal.pop_undo().map(|d| d.old_pc), Some(4));
    assert!(journal.pop_undo().is_none());
}

/// Counts up in x1, stores it, and accumulates into x2.
fn counting_program() -> Vec<u32> {
    vec![
        inst().addi(1, 1, 1).build(),
        inst().sd(5, 1, 0).build(),
        inst().add(2, 2, 1).build(),
        inst().jal(0, -12).build(),
    ]
}

fn snapshot(ctx: &TestContext) -> ([u64; 32], u64, u64, u64) {
    (
        ctx.gprs(),
        ctx.pc(),
        ctx.read_double_word(0x1000_0000),
        ctx.cpu().stats.instructions_retired,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn undo_then_redo_round_trips(steps in 1usize..40, undos in 0usize..40) {
        let mut ctx = TestContext::new().load_program(&counting_program());
        ctx.set_reg(5, 0x1000_0000);

        let mut history = vec![snapshot(&ctx)];
        for _ in 0..steps {
            let _ = ctx.sim.debug_step().unwrap();
            history.push(snapshot(&ctx));
        }

        let undos = undos.min(steps);
        for i in 1..=undos {
            prop_assert!(ctx.sim.undo().unwrap());
            prop_assert_eq!(snapshot(&ctx), history[steps - i]);
        }
        for _ in 0..undos {
            prop_assert!(ctx.sim.redo().unwrap());
        }
        prop_assert_eq!(snapshot(&ctx), history[steps]);
        prop_assert!(!ctx.sim.redo().unwrap());
    }
}

/// Full floating-point state: FPR bits, `fcsr`, and the integer file.
fn fp_snapshot(ctx: &TestContext) -> ([u64; 32], [u64; 32], u64, u64) {
    (ctx.fprs(), ctx.gprs(), ctx.read_csr(u64::from(FCSR)), ctx.pc())
}

#[test]
fn undo_restores_fp_registers_and_fcsr() {
    let mut ctx = TestContext::new().load_program(&[
        inst().li(1, 5).build(),
        inst().fcvt_s_w(1, 1).build(),
        inst().fcvt_s_w(2, 0).build(),
        inst().fmv_w_x(4, 1).build(),
        // 5.0 / 0.0 raises divide-by-zero in fflags.
        inst().fdiv_s(3, 1, 2).build(),
        inst().csrrwi(7, u32::from(FRM), 0b010).build(),
        inst().li(6, 0b001_00001).build(),
        inst().csrrw(8, u32::from(FCSR), 6).build(),
    ]);

    let mut history = vec![fp_snapshot(&ctx)];
    while ctx.sim.debug_step().unwrap().is_none() {
        history.push(fp_snapshot(&ctx));
    }
    history.push(fp_snapshot(&ctx));
    let steps = history.len() - 1;
    assert_eq!(steps, 8);
    assert_eq!(ctx.read_csr(u64::from(FCSR)), 0b001_00001);

    for i in 1..=steps {
        assert!(ctx.sim.undo().unwrap());
        assert_eq!(fp_snapshot(&ctx), history[steps - i]);
        if steps - i == 5 {
            // Just before the rounding-mode write: only the DZ flag is set.
            assert_eq!(ctx.read_csr(u64::from(FFLAGS)), 0b01000);
        }
    }
    assert_eq!(ctx.pc(), 0);

    for _ in 0..steps {
        assert!(ctx.sim.redo().unwrap());
    }
    assert_eq!(fp_snapshot(&ctx), history[steps]);
}

#[test]
fn undo_reverts_exit() {
    let mut ctx = TestContext::new().load_program(&[
        inst().li(17, 10).build(),
        inst().li(10, 4).build(),
        inst().ecall().build(),
    ]);
    assert_eq!(ctx.sim.debug_run().unwrap(), rvss_core::HaltReason::Exit(4));

    assert!(ctx.sim.undo().unwrap());
    assert_eq!(ctx.cpu().exit_code(), None);
    assert_eq!(ctx.pc(), 8);

    assert!(ctx.sim.redo().unwrap());
    assert_eq!(ctx.cpu().exit_code(), Some(4));
}

#[test]
fn undo_with_empty_history_is_a_no_op() {
    let mut ctx = TestContext::new().load_program(&[inst().addi(1, 0, 1).build()]);
    assert!(!ctx.sim.undo().unwrap());
    assert!(!ctx.sim.redo().unwrap());
}

#[test]
fn plain_step_discards_history() {
    let mut ctx = TestContext::new().load_program(&counting_program());
    let _ = ctx.sim.debug_step().unwrap();
    let _ = ctx.step();
    assert!(!ctx.sim.undo().unwrap());
}
