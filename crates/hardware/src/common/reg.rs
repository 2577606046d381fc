//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, which owns every piece of mutable
//! architectural register state. It provides:
//! 1. **Unified Storage:** GPRs, FPRs, the CSR space, and the program counter.
//! 2. **Bounds Checking:** Out-of-range register or CSR indices fail with a typed error.
//! 3. **Width Handling:** GPR and PC values are truncated to XLEN in RV32 mode.
//! 4. **Reset:** Restores the stack/global/thread pointers and round-to-nearest-even.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::core::arch::csr::{CSR_COUNT, Csrs, FRM};
use crate::core::arch::fpr::{FPR_COUNT, Fpr};
use crate::core::arch::gpr::{GPR_COUNT, Gpr};
use crate::core::arch::mode::IsaMode;
use crate::isa::abi::{self, REG_GP, REG_SP, REG_TP};

/// Register file selector used by journal entries and events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterClass {
    /// Integer registers `x0`-`x31`.
    Gpr,
    /// Floating-point registers `f0`-`f31`.
    Fpr,
    /// Control and status registers.
    Csr,
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gpr => "GPR",
            Self::Fpr => "FPR",
            Self::Csr => "CSR",
        })
    }
}

/// Unified register file: GPRs, FPRs, CSRs, and the program counter.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    gpr: Gpr,
    fpr: Fpr,
    csr: Csrs,
    pc: u64,
    mode: IsaMode,
    sp: u64,
    gp: u64,
    tp: u64,
}

impl RegisterFile {
    /// Creates a register file in its reset state.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the ISA width and the pointer presets.
    pub fn new(config: &Config) -> Self {
        let mut regs = Self {
            gpr: Gpr::new(),
            fpr: Fpr::new(),
            csr: Csrs::new(),
            pc: 0,
            mode: config.general.isa,
            sp: config.memory.stack_pointer,
            gp: config.memory.global_pointer,
            tp: config.memory.thread_pointer,
        };
        regs.reset();
        regs
    }

    /// Restores architectural defaults.
    ///
    /// Clears every register, presets `sp`/`gp`/`tp`, sets `pc` to 0 and selects
    /// round-to-nearest-even in `frm`.
    pub fn reset(&mut self) {
        self.gpr.clear();
        self.fpr.clear();
        self.csr.clear();
        self.pc = 0;
        self.gpr.write(REG_SP, self.mode.truncate(self.sp));
        self.gpr.write(REG_GP, self.mode.truncate(self.gp));
        self.gpr.write(REG_TP, self.mode.truncate(self.tp));
        self.csr.write(FRM, 0);
    }

    /// Active ISA width.
    pub const fn mode(&self) -> IsaMode {
        self.mode
    }

    /// Reads integer register `idx`.
    pub fn read_gpr(&self, idx: usize) -> SimResult<u64> {
        check_index(RegisterClass::Gpr, idx, GPR_COUNT)?;
        Ok(self.gpr.read(idx))
    }

    /// Writes integer register `idx`, truncating to XLEN. Writes to `x0` are dropped.
    pub fn write_gpr(&mut self, idx: usize, val: u64) -> SimResult<()> {
        check_index(RegisterClass::Gpr, idx, GPR_COUNT)?;
        self.gpr.write(idx, self.mode.truncate(val));
        Ok(())
    }

    /// Reads the raw bits of floating-point register `idx`.
    pub fn read_fpr(&self, idx: usize) -> SimResult<u64> {
        check_index(RegisterClass::Fpr, idx, FPR_COUNT)?;
        Ok(self.fpr.read(idx))
    }

    /// Writes the raw bits of floating-point register `idx`.
    pub fn write_fpr(&mut self, idx: usize, val: u64) -> SimResult<()> {
        check_index(RegisterClass::Fpr, idx, FPR_COUNT)?;
        self.fpr.write(idx, val);
        Ok(())
    }

    /// Reads the CSR at `addr`.
    pub fn read_csr(&self, addr: u64) -> SimResult<u64> {
        Ok(self.csr.read(csr_index(addr)?))
    }

    /// Writes the CSR at `addr`.
    pub fn write_csr(&mut self, addr: u64, val: u64) -> SimResult<()> {
        self.csr.write(csr_index(addr)?, val);
        Ok(())
    }

    /// Reads a register of any class.
    pub fn read(&self, class: RegisterClass, idx: usize) -> SimResult<u64> {
        match class {
            RegisterClass::Gpr => self.read_gpr(idx),
            RegisterClass::Fpr => self.read_fpr(idx),
            RegisterClass::Csr => self.read_csr(idx as u64),
        }
    }

    /// Writes a register of any class.
    pub fn write(&mut self, class: RegisterClass, idx: usize, val: u64) -> SimResult<()> {
        match class {
            RegisterClass::Gpr => self.write_gpr(idx, val),
            RegisterClass::Fpr => self.write_fpr(idx, val),
            RegisterClass::Csr => self.write_csr(idx as u64, val),
        }
    }

    /// Direct access to the CSR file for the floating-point status path.
    pub const fn csrs(&self) -> &Csrs {
        &self.csr
    }

    /// Program counter.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Sets the program counter, truncated to XLEN.
    pub const fn set_pc(&mut self, pc: u64) {
        self.pc = self.mode.truncate(pc);
    }

    /// Snapshot of all integer registers.
    pub fn gprs(&self) -> [u64; GPR_COUNT] {
        std::array::from_fn(|i| self.gpr.read(i))
    }

    /// Snapshot of all floating-point registers.
    pub fn fprs(&self) -> [u64; FPR_COUNT] {
        std::array::from_fn(|i| self.fpr.read(i))
    }

    /// Formats the integer registers, two per line, with ABI names.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for i in (0..GPR_COUNT).step_by(2) {
            let _ = writeln!(
                out,
                "x{:<2} {:<4} {:#018x}   x{:<2} {:<4} {:#018x}",
                i,
                abi::GPR_NAMES[i],
                self.gpr.read(i),
                i + 1,
                abi::GPR_NAMES[i + 1],
                self.gpr.read(i + 1)
            );
        }
        let _ = writeln!(out, "pc       {:#018x}", self.pc);
        out
    }
}

fn check_index(class: RegisterClass, index: usize, count: usize) -> SimResult<()> {
    if index < count {
        Ok(())
    } else {
        Err(SimError::InvalidRegister { class, index })
    }
}

fn csr_index(addr: u64) -> SimResult<u16> {
    if addr < CSR_COUNT as u64 {
        Ok(addr as u16)
    } else {
        Err(SimError::InvalidCsr(addr))
    }
}
