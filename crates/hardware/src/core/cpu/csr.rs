//! CSR Access Logic.
//!
//! This module implements the Zicsr instructions for the CPU. It performs the following:
//! 1. **Read Operations:** Retrieves CSR values; the user counters are backed by statistics.
//! 2. **Write Operations:** Applies the read-modify-write semantics of `csrrw`/`csrrs`/`csrrc`
//!    and their immediate forms through the journaled commit path.
//! 3. **Side Effect Management:** Set/clear forms with a zero source do not write, so they
//!    never touch read-only counters.

use super::Cpu;
use crate::common::error::SimResult;
use crate::core::arch::csr;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::system;

impl Cpu {
    /// Reads a value from a Control and Status Register (CSR).
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit address of the CSR to read.
    ///
    /// # Returns
    ///
    /// The current value; `cycle`/`time` report simulated cycles and `instret` the
    /// retired-instruction count.
    pub fn read_csr(&self, addr: u64) -> SimResult<u64> {
        let value = self.regs.read_csr(addr)?;
        Ok(match addr as u16 {
            csr::CYCLE | csr::TIME => self.stats.cycles,
            csr::INSTRET => self.stats.instructions_retired,
            _ => value,
        })
    }

    /// Executes one CSR instruction.
    ///
    /// The old CSR value is always written to `rd`. The new value is written unless the
    /// instruction is a set/clear form whose source (`rs1` or `uimm`) is zero.
    pub(crate) fn execute_csr(&mut self, word: u32) -> SimResult<()> {
        let addr = u64::from(word.csr());
        let funct3 = word.funct3();
        let old = self.read_csr(addr)?;

        let source = if funct3 & 0b100 == 0 {
            self.regs.read_gpr(word.rs1())?
        } else {
            word.rs1() as u64
        };
        let source_is_zero = word.rs1() == 0;

        let new = match funct3 {
            system::CSRRW | system::CSRRWI => Some(source),
            system::CSRRS | system::CSRRSI if !source_is_zero => Some(old | source),
            system::CSRRC | system::CSRRCI if !source_is_zero => Some(old & !source),
            _ => None,
        };

        if let Some(value) = new {
            self.commit_csr(addr, value)?;
        }
        self.commit_gpr(word.rd(), old)
    }

    /// ORs floating-point exception flags into `fflags` through the commit path.
    pub(crate) fn accrue_fp_flags(&mut self, flags: u8) -> SimResult<()> {
        if flags == 0 {
            return Ok(());
        }
        let fflags = u64::from(csr::FFLAGS);
        let current = self.regs.read_csr(fflags)?;
        let merged = current | u64::from(flags);
        if merged == current {
            return Ok(());
        }
        self.commit_csr(fflags, merged)
    }
}
