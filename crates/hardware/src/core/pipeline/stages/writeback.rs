//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It commits
//! the result of the instruction in MEM/WB to its destination register, reports
//! instructions that were carried as no-ops, and counts the instruction as retired.

use tracing::trace;

use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::latches::PipelineRegisters;

/// Executes the writeback stage of the pipeline.
///
/// Writes to `x0` are dropped by the register file.
///
/// # Arguments
///
/// * `cpu` - Architectural state; the destination register and statistics are updated,
///   and skipped instructions are reported.
/// * `cur` - Pipeline registers at the start of the cycle.
pub fn wb_stage(cpu: &mut Cpu, cur: &PipelineRegisters) -> SimResult<()> {
    let wb = cur.mem_wb;
    if !wb.valid {
        return Ok(());
    }
    if let Some(skipped) = wb.skipped {
        cpu.report(&skipped.error(wb.pc));
    }
    if wb.ctrl.reg_write {
        cpu.commit_gpr(wb.rd, wb.result())?;
    }
    if let Some(class) = wb.class {
        cpu.stats.record_retire(class);
    }
    trace!(pc = wb.pc, word = wb.word, "retire");
    Ok(())
}
