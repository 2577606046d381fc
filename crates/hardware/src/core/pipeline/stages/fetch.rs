//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It fetches
//! the word at the program counter, or at the target of a redirect requested by EX
//! in the previous cycle, and advances the PC by one instruction. No branch
//! prediction is modeled: fetch always continues sequentially until redirected.

use tracing::trace;

use super::CycleControl;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::latches::{IfId, PipelineRegisters};

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Architectural state; the PC is read and advanced.
/// * `cur` - Pipeline registers at the start of the cycle.
/// * `next` - Pipeline registers being built for the next cycle.
/// * `ctl` - Stall, redirect, and fetch-enable signals.
///
/// # Behavior
///
/// - On a stall, IF/ID is held and the PC does not move.
/// - A pending redirect replaces the PC before fetching.
/// - Nothing is fetched when fetch is disabled or the PC is past the loaded text.
pub fn fetch_stage(
    cpu: &mut Cpu,
    cur: &PipelineRegisters,
    next: &mut PipelineRegisters,
    ctl: &mut CycleControl,
) -> SimResult<()> {
    if ctl.stall {
        next.if_id = cur.if_id;
        return Ok(());
    }

    let pc = ctl.redirect.take().unwrap_or_else(|| cpu.regs.pc());
    cpu.regs.set_pc(pc);
    if !ctl.fetch_enabled || pc >= cpu.program_size() {
        return Ok(());
    }

    let word = cpu.memory.read_word(pc)?;
    trace!(pc, word, "IF");
    next.if_id = IfId {
        valid: true,
        pc,
        word,
    };
    cpu.regs.set_pc(pc.wrapping_add(INSTRUCTION_SIZE));
    ctl.fetched = Some(pc);
    Ok(())
}
