//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **Operand Resolution:** Uses the forwarding unit to resolve data hazards.
//! 2. **Arithmetic Execution:** Performs integer ALU operations and address generation.
//! 3. **Branch Resolution:** Evaluates branch conditions and jump targets; a taken
//!    transfer flushes the two younger instructions and redirects the next fetch.
//! 4. **System Execution:** Runs `ecall`, which reaches EX only once older instructions
//!    have retired, and commits its effects directly.

use tracing::trace;

use super::CycleControl;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::cpu::execution::{alu, branch_taken, operand_b};
use crate::core::cpu::syscall::SyscallOutcome;
use crate::core::pipeline::hazards::ForwardingUnit;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, PipelineRegisters};
use crate::core::pipeline::signals::AluOp;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{OP_AUIPC, OP_BRANCH, OP_JAL, OP_JALR, OP_LOAD, OP_STORE};

/// Bit mask to ensure `JALR` target addresses are 2-byte aligned.
const JALR_ALIGNMENT_MASK: u64 = !1;

/// Number of younger instruction slots discarded by a taken branch or jump.
const FLUSHED_SLOTS: u64 = 2;

/// Executes the instruction execute stage.
///
/// # Arguments
///
/// * `cpu` - Architectural state; only `ecall` commits here.
/// * `cur` - Pipeline registers at the start of the cycle.
/// * `next` - Pipeline registers being built for the next cycle.
/// * `ctl` - Forwarding enable; receives redirect, exit, and interrupt signals.
pub fn execute_stage(
    cpu: &mut Cpu,
    cur: &PipelineRegisters,
    next: &mut PipelineRegisters,
    ctl: &mut CycleControl,
) -> SimResult<()> {
    let id = cur.id_ex;
    if !id.valid {
        return Ok(());
    }
    trace!(pc = id.pc, word = id.word, "EX");

    let mode = cpu.mode();
    let (a, b) = if ctl.forwarding {
        (
            ForwardingUnit::forward(id.rs1, id.rv1, &cur.ex_mem, &cur.mem_wb).0,
            ForwardingUnit::forward(id.rs2, id.rv2, &cur.ex_mem, &cur.mem_wb).0,
        )
    } else {
        (id.rv1, id.rv2)
    };

    let mut out = ExMem {
        valid: true,
        pc: id.pc,
        word: id.word,
        rd: id.rd,
        alu_result: 0,
        store_data: b,
        ctrl: id.ctrl,
        class: id.class,
        skipped: id.skipped,
    };

    if id.is_ecall {
        execute_ecall(cpu, id.pc, next, ctl)?;
        next.ex_mem = out;
        return Ok(());
    }

    let link = mode.truncate(id.pc.wrapping_add(INSTRUCTION_SIZE));
    let mut target = None;
    match id.word.opcode() {
        OP_JAL => {
            out.alu_result = link;
            target = Some(id.pc.wrapping_add_signed(id.imm));
        }
        OP_JALR => {
            out.alu_result = link;
            target = Some(a.wrapping_add_signed(id.imm) & JALR_ALIGNMENT_MASK);
        }
        OP_BRANCH => {
            let (result, _) = alu(mode, id.op, a, b);
            if branch_taken(id.word.funct3(), result) {
                target = Some(id.pc.wrapping_add_signed(id.imm));
            }
        }
        OP_AUIPC => out.alu_result = alu(mode, AluOp::Add, id.pc, id.imm as u64).0,
        OP_LOAD | OP_STORE => out.alu_result = mode.truncate(a.wrapping_add_signed(id.imm)),
        _ => out.alu_result = alu(mode, id.op, a, operand_b(id.ctrl, b, id.imm)).0,
    }

    if let Some(target) = target {
        let target = mode.truncate(target);
        trace!(pc = id.pc, target, "redirect");
        ctl.new_redirect = Some(target);
        flush_younger(next);
        cpu.stats.flushes += 1;
        cpu.stats.stalls_control += FLUSHED_SLOTS;
    }
    next.ex_mem = out;
    Ok(())
}

/// Runs the syscall of an `ecall` in EX.
fn execute_ecall(
    cpu: &mut Cpu,
    pc: u64,
    next: &mut PipelineRegisters,
    ctl: &mut CycleControl,
) -> SimResult<()> {
    match cpu.execute_syscall(pc) {
        Ok(SyscallOutcome::Continue) => {
            // The instruction decoded this cycle read its operands before the syscall ran.
            if next.id_ex.valid {
                let mem_wb = next.mem_wb;
                next.id_ex.rv1 = super::decode::read_operand(cpu, next.id_ex.rs1, &mem_wb)?;
                next.id_ex.rv2 = super::decode::read_operand(cpu, next.id_ex.rs2, &mem_wb)?;
            }
        }
        Ok(SyscallOutcome::Exit(_)) => {
            let discarded = u64::from(next.if_id.valid) + u64::from(next.id_ex.valid);
            flush_younger(next);
            cpu.stats.flushes += 1;
            cpu.stats.stalls_control += discarded;
            ctl.exited = true;
        }
        Ok(SyscallOutcome::Interrupted) => ctl.interrupted = true,
        Err(error) if !error.is_fatal() => cpu.report(&error),
        Err(error) => return Err(error),
    }
    Ok(())
}

fn flush_younger(next: &mut PipelineRegisters) {
    next.if_id = IfId::default();
    next.id_ex = IdEx::default();
}
