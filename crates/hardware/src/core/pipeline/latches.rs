//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the registers between the five classic stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** Each latch carries the PC and raw word of its instruction
//!    plus whatever the next stage needs.
//! 2. **Bubbles:** A latch with `valid == false` holds no instruction; stalls and
//!    flushes insert bubbles by clearing it.
//! 3. **Deferred Warnings:** An instruction the pipeline does not execute travels as a
//!    no-op tagged with [`Skipped`] and is reported only if it retires.
//! 4. **Double Buffering:** [`PipelineRegisters`] is cloned at the start of each cycle
//!    so that every stage reads the previous cycle's values.

use crate::common::error::SimError;
use crate::core::arch::mode::IsaMode;
use crate::core::pipeline::signals::{AluOp, ControlSignals};
use crate::stats::InstructionClass;

/// Original word of an instruction that flows through the pipeline as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skipped {
    /// Floating-point or CSR instruction.
    Unsupported(u32),
    /// RV64-only instruction on an RV32 machine.
    WrongMode(u32, IsaMode),
}

impl Skipped {
    /// Warning reported when the instruction at `pc` retires.
    pub const fn error(self, pc: u64) -> SimError {
        match self {
            Self::Unsupported(word) => SimError::UnsupportedInPipeline { pc, word },
            Self::WrongMode(word, mode) => SimError::UnsupportedInMode { pc, word, mode },
        }
    }
}

/// IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfId {
    /// Holds an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub word: u32,
}

/// ID/EX latch (Decode to Execute).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdEx {
    /// Holds an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub word: u32,
    /// First integer source register, if read.
    pub rs1: Option<usize>,
    /// Second integer source register, if read.
    pub rs2: Option<usize>,
    /// Destination register index.
    pub rd: usize,
    /// Value read from `rs1` at decode.
    pub rv1: u64,
    /// Value read from `rs2` at decode.
    pub rv2: u64,
    /// Sign-extended immediate.
    pub imm: i64,
    /// Stage enables.
    pub ctrl: ControlSignals,
    /// ALU operation.
    pub op: AluOp,
    /// The instruction is `ecall`.
    pub is_ecall: bool,
    /// Retirement category.
    pub class: Option<InstructionClass>,
    /// Set when the instruction is carried as a no-op.
    pub skipped: Option<Skipped>,
}

/// EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExMem {
    /// Holds an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub word: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result, effective address, or link address.
    pub alu_result: u64,
    /// Data to be stored.
    pub store_data: u64,
    /// Stage enables.
    pub ctrl: ControlSignals,
    /// Retirement category.
    pub class: Option<InstructionClass>,
    /// Set when the instruction is carried as a no-op.
    pub skipped: Option<Skipped>,
}

/// MEM/WB latch (Memory to Writeback).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemWb {
    /// Holds an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub word: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result (for non-load instructions).
    pub alu_result: u64,
    /// Data loaded from memory.
    pub load_data: u64,
    /// Stage enables.
    pub ctrl: ControlSignals,
    /// Retirement category.
    pub class: Option<InstructionClass>,
    /// Set when the instruction is carried as a no-op.
    pub skipped: Option<Skipped>,
}

impl ExMem {
    /// Register value this instruction will write, if it writes a non-zero register
    /// and the value is already known (loads are not).
    pub const fn forward_value(&self) -> Option<u64> {
        if self.valid && self.ctrl.reg_write && !self.ctrl.mem_read && self.rd != 0 {
            Some(self.alu_result)
        } else {
            None
        }
    }
}

impl MemWb {
    /// Value written back to `rd`.
    pub const fn result(&self) -> u64 {
        if self.ctrl.mem_to_reg {
            self.load_data
        } else {
            self.alu_result
        }
    }

    /// Register value this instruction writes, if it writes a non-zero register.
    pub const fn forward_value(&self) -> Option<u64> {
        if self.valid && self.ctrl.reg_write && self.rd != 0 {
            Some(self.result())
        } else {
            None
        }
    }
}

/// The full set of pipeline registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineRegisters {
    /// IF/ID.
    pub if_id: IfId,
    /// ID/EX.
    pub id_ex: IdEx,
    /// EX/MEM.
    pub ex_mem: ExMem,
    /// MEM/WB.
    pub mem_wb: MemWb,
}

impl PipelineRegisters {
    /// True when no latch holds an instruction.
    pub const fn is_empty(&self) -> bool {
        !(self.if_id.valid || self.id_ex.valid || self.ex_mem.valid || self.mem_wb.valid)
    }

    /// True when every instruction older than the one in IF/ID has left the pipeline.
    pub const fn is_drained_behind_decode(&self) -> bool {
        !(self.id_ex.valid || self.ex_mem.valid || self.mem_wb.valid)
    }
}
