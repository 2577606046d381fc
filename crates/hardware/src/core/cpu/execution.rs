//! Instruction Execution Logic.
//!
//! This module implements the functional behavior of one instruction. It performs:
//! 1. **Operand Selection:** Register or immediate operands, per the control signals.
//! 2. **ALU Dispatch:** Integer operations with the active ISA width, and floating-point
//!    operations with dynamic rounding-mode resolution and `fflags` accrual.
//! 3. **Control Flow:** Branch condition evaluation and jump target computation.
//! 4. **Single-cycle Datapath:** [`Cpu::execute_instruction`] runs fetch through
//!    write-back for one instruction, committing through the journaled write path.

use tracing::trace;

use super::Cpu;
use super::syscall::SyscallOutcome;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{SimError, SimResult};
use crate::core::arch::mode::IsaMode;
use crate::core::control::ControlDecoder;
use crate::core::pipeline::signals::{AluOp, ControlSignals};
use crate::core::units::alu::Alu;
use crate::core::units::fpu::rounding_modes::RoundingMode;
use crate::isa::decode;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{
    OP_AUIPC, OP_BRANCH, OP_JAL, OP_JALR, OP_LOAD, OP_LOAD_FP, OP_STORE, OP_STORE_FP, OP_SYSTEM,
    branch, system,
};
use crate::isa::table;

/// Runs an integer ALU operation with the semantics of `mode`.
///
/// # Returns
///
/// `(result, overflow)`; the result is sign-extended from bit 31 in RV32 mode.
pub fn alu(mode: IsaMode, op: AluOp, a: u64, b: u64) -> (u64, bool) {
    if mode.is_rv32() {
        Alu::execute_rv32(op, a, b)
    } else {
        Alu::execute(op, a, b)
    }
}

/// Evaluates a branch condition from `funct3` and the comparison result.
///
/// `beq`/`bne` compare with a subtraction (zero means equal); the others use
/// `slt`/`sltu` (one means less than).
pub const fn branch_taken(funct3: u32, alu_result: u64) -> bool {
    match funct3 {
        branch::BEQ => alu_result == 0,
        branch::BNE => alu_result != 0,
        branch::BLT | branch::BLTU => alu_result == 1,
        branch::BGE | branch::BGEU => alu_result == 0,
        _ => false,
    }
}

/// Second ALU operand: the immediate or `rs2`, per `alu_src`.
pub const fn operand_b(ctrl: ControlSignals, rs2_value: u64, imm: i64) -> u64 {
    if ctrl.alu_src { imm as u64 } else { rs2_value }
}

/// Checks that `word` exists in `mode`.
fn check_mode(pc: u64, word: u32, mode: IsaMode) -> SimResult<()> {
    if ControlDecoder::requires_rv64(word, mode) {
        return Err(SimError::UnsupportedInMode { pc, word, mode });
    }
    Ok(())
}

impl Cpu {
    /// Reads the instruction word at the current PC.
    pub(crate) fn fetch(&self) -> SimResult<u32> {
        self.memory.read_word(self.regs.pc())
    }

    /// Executes `word`, fetched from `pc`, to completion.
    ///
    /// The PC is advanced before execution so that jumps and branches overwrite it.
    /// Unknown encodings retire as no-ops.
    ///
    /// # Returns
    ///
    /// Whether the program continues, exited, or was interrupted by a stop request
    /// while blocked in a read syscall.
    pub(crate) fn execute_instruction(&mut self, pc: u64, word: u32) -> SimResult<SyscallOutcome> {
        let mode = self.mode();
        self.regs.set_pc(pc.wrapping_add(INSTRUCTION_SIZE));
        trace!(pc, word, mnemonic = table::mnemonic(word), "execute");

        check_mode(pc, word, mode)?;
        if !ControlDecoder::is_supported(word, mode) {
            return Ok(SyscallOutcome::Continue);
        }

        let ctrl = ControlDecoder::control_signals(word);
        let op = ControlDecoder::alu_signal(word);
        match word.opcode() {
            OP_SYSTEM => self.execute_system(pc, word),
            OP_LOAD_FP | OP_STORE_FP => {
                self.execute_fp_transfer(word)?;
                Ok(SyscallOutcome::Continue)
            }
            _ if op.is_floating() => {
                self.execute_float(pc, word, op)?;
                Ok(SyscallOutcome::Continue)
            }
            _ => {
                self.execute_integer(pc, word, ctrl, op)?;
                Ok(SyscallOutcome::Continue)
            }
        }
    }

    fn execute_system(&mut self, pc: u64, word: u32) -> SimResult<SyscallOutcome> {
        if word == system::ECALL {
            return self.execute_syscall(pc);
        }
        if word.funct3() != system::PRIV {
            self.execute_csr(word)?;
        }
        Ok(SyscallOutcome::Continue)
    }

    fn execute_integer(
        &mut self,
        pc: u64,
        word: u32,
        ctrl: ControlSignals,
        op: AluOp,
    ) -> SimResult<()> {
        let mode = self.mode();
        let rs1 = self.regs.read_gpr(word.rs1())?;
        let rs2 = self.regs.read_gpr(word.rs2())?;
        let imm = decode::immediate(word);
        let link = mode.truncate(pc.wrapping_add(INSTRUCTION_SIZE));

        match word.opcode() {
            OP_JAL => {
                self.commit_gpr(word.rd(), link)?;
                self.regs.set_pc(pc.wrapping_add_signed(imm));
            }
            OP_JALR => {
                let target = rs1.wrapping_add_signed(imm) & !1;
                self.commit_gpr(word.rd(), link)?;
                self.regs.set_pc(target);
            }
            OP_BRANCH => {
                let (result, _) = alu(mode, op, rs1, rs2);
                if branch_taken(word.funct3(), result) {
                    self.regs.set_pc(pc.wrapping_add_signed(imm));
                }
            }
            OP_LOAD => {
                let address = mode.truncate(rs1.wrapping_add_signed(imm));
                let value = self.load(address, word.funct3())?;
                self.commit_gpr(word.rd(), value)?;
            }
            OP_STORE => {
                let address = mode.truncate(rs1.wrapping_add_signed(imm));
                self.store(address, word.funct3(), rs2)?;
            }
            OP_AUIPC => {
                let (result, _) = alu(mode, AluOp::Add, pc, imm as u64);
                self.commit_gpr(word.rd(), result)?;
            }
            _ => {
                let (result, overflow) = alu(mode, op, rs1, operand_b(ctrl, rs2, imm));
                if overflow {
                    trace!(pc, ?op, "signed overflow");
                }
                if ctrl.reg_write {
                    self.commit_gpr(word.rd(), result)?;
                }
            }
        }
        Ok(())
    }

    fn execute_fp_transfer(&mut self, word: u32) -> SimResult<()> {
        let base = self.regs.read_gpr(word.rs1())?;
        let address = self.mode().truncate(base.wrapping_add_signed(decode::immediate(word)));
        if word.opcode() == OP_LOAD_FP {
            let bits = self.load_fp(address, word.funct3())?;
            self.commit_fpr(word.rd(), bits)
        } else {
            let bits = self.regs.read_fpr(word.rs2())?;
            self.store_fp(address, word.funct3(), bits)
        }
    }

    /// Executes a floating-point computational instruction.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction, for error reporting.
    /// * `word` - Raw instruction word.
    /// * `op` - Decoded [`AluOp::Float`] or [`AluOp::Double`] operation.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidRoundingMode`] when the effective rounding mode is reserved;
    /// nothing is written in that case.
    pub(crate) fn execute_float(&mut self, pc: u64, word: u32, op: AluOp) -> SimResult<()> {
        let (fp_op, double) = match op {
            AluOp::Float(fp_op) => (fp_op, false),
            AluOp::Double(fp_op) => (fp_op, true),
            _ => return Ok(()),
        };

        let rm = if fp_op.uses_rounding_mode() {
            RoundingMode::resolve(word.rm(), self.regs.csrs().frm())
                .map_err(|rm| SimError::InvalidRoundingMode { pc, rm })?
        } else {
            RoundingMode::default()
        };

        let a = if fp_op.reads_int_operand() {
            self.regs.read_gpr(word.rs1())?
        } else {
            self.regs.read_fpr(word.rs1())?
        };
        let b = self.regs.read_fpr(word.rs2())?;
        let c = if fp_op.is_fused() {
            self.regs.read_fpr(word.rs3())?
        } else {
            0
        };

        let (result, flags) = if double {
            Alu::execute_double(fp_op, a, b, c, rm)
        } else {
            Alu::execute_float(fp_op, a, b, c, rm)
        };

        if fp_op.writes_int_result() {
            self.commit_gpr(word.rd(), result)?;
        } else {
            self.commit_fpr(word.rd(), result)?;
        }
        self.accrue_fp_flags(flags.bits())
    }
}
