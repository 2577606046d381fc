//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. Loads and
//! stores are sized by `funct3`; stores go through the journaled commit path.
//! Accesses need no alignment.

use tracing::trace;

use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::latches::{MemWb, PipelineRegisters};
use crate::isa::instruction::InstructionBits;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Architectural state; memory is read or written.
/// * `cur` - Pipeline registers at the start of the cycle.
/// * `next` - Pipeline registers being built for the next cycle.
pub fn mem_stage(
    cpu: &mut Cpu,
    cur: &PipelineRegisters,
    next: &mut PipelineRegisters,
) -> SimResult<()> {
    let ex = cur.ex_mem;
    if !ex.valid {
        return Ok(());
    }
    let funct3 = ex.word.funct3();

    let load_data = if ex.ctrl.mem_read {
        let value = cpu.load(ex.alu_result, funct3)?;
        trace!(pc = ex.pc, address = ex.alu_result, value, "MEM load");
        value
    } else {
        0
    };
    if ex.ctrl.mem_write {
        trace!(pc = ex.pc, address = ex.alu_result, value = ex.store_data, "MEM store");
        cpu.store(ex.alu_result, funct3, ex.store_data)?;
    }

    next.mem_wb = MemWb {
        valid: true,
        pc: ex.pc,
        word: ex.word,
        rd: ex.rd,
        alu_result: ex.alu_result,
        load_data,
        ctrl: ex.ctrl,
        class: ex.class,
        skipped: ex.skipped,
    };
    Ok(())
}
