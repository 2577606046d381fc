//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Decoding:** Derives control signals and the ALU operation of the word in IF/ID.
//! 2. **Register Read:** Reads integer source operands, bypassing the value being written
//!    back this cycle.
//! 3. **Filtering:** Instructions the pipeline does not model (floating point, CSR access)
//!    and instructions of the wrong ISA width continue as no-ops; WB reports them if
//!    they are not flushed first.
//! 4. **Stalling:** When the hazard unit stalls, a bubble enters ID/EX.

use tracing::trace;

use super::CycleControl;
use crate::common::constants::NOP;
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::control::ControlDecoder;
use crate::core::pipeline::latches::{IdEx, MemWb, PipelineRegisters, Skipped};
use crate::isa::decode;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{self, OP_SYSTEM, system};
use crate::stats::InstructionClass;

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `cpu` - Architectural state; source registers are read.
/// * `cur` - Pipeline registers at the start of the cycle.
/// * `next` - Pipeline registers being built for the next cycle.
/// * `ctl` - Stall signal from the hazard unit.
pub fn decode_stage(
    cpu: &mut Cpu,
    cur: &PipelineRegisters,
    next: &mut PipelineRegisters,
    ctl: &CycleControl,
) -> SimResult<()> {
    if ctl.stall {
        cpu.stats.stalls_data += 1;
        next.id_ex = IdEx::default();
        return Ok(());
    }

    let if_id = cur.if_id;
    if !if_id.valid {
        return Ok(());
    }
    let (pc, word) = (if_id.pc, if_id.word);
    trace!(pc, word, "ID");

    let no_op = IdEx {
        valid: true,
        pc,
        word: NOP,
        class: Some(InstructionClass::of(word)),
        ..IdEx::default()
    };

    let mode = cpu.mode();
    if ControlDecoder::requires_rv64(word, mode) {
        next.id_ex = IdEx {
            skipped: Some(Skipped::WrongMode(word, mode)),
            ..no_op
        };
        return Ok(());
    }
    if !ControlDecoder::is_supported(word, mode) {
        next.id_ex = no_op;
        return Ok(());
    }

    let is_ecall = word == system::ECALL;
    let op = ControlDecoder::alu_signal(word);
    let is_csr = word.opcode() == OP_SYSTEM && word.funct3() != system::PRIV;
    if op.is_floating() || opcodes::is_floating(word.opcode()) || is_csr {
        next.id_ex = IdEx {
            skipped: Some(Skipped::Unsupported(word)),
            ..no_op
        };
        return Ok(());
    }
    if word.opcode() == OP_SYSTEM && !is_ecall {
        next.id_ex = no_op;
        return Ok(());
    }

    let (rs1, rs2) = ControlDecoder::int_sources(word);
    let mut ctrl = ControlDecoder::control_signals(word);
    if is_ecall {
        ctrl.reg_write = false;
    }
    next.id_ex = IdEx {
        valid: true,
        pc,
        word,
        rs1,
        rs2,
        rd: word.rd(),
        rv1: read_operand(cpu, rs1, &cur.mem_wb)?,
        rv2: read_operand(cpu, rs2, &cur.mem_wb)?,
        imm: decode::immediate(word),
        ctrl,
        op,
        is_ecall,
        class: Some(InstructionClass::of(word)),
        skipped: None,
    };
    Ok(())
}

/// Reads a source register, taking the value being written back this cycle if the
/// instruction in WB targets it.
pub(crate) fn read_operand(cpu: &Cpu, source: Option<usize>, mem_wb: &MemWb) -> SimResult<u64> {
    let Some(reg) = source else {
        return Ok(0);
    };
    match mem_wb.forward_value() {
        Some(value) if mem_wb.rd == reg => Ok(value),
        _ => cpu.regs.read_gpr(reg),
    }
}
