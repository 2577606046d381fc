//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the architectural state shared by
//! both executors. It coordinates the following:
//! 1. **State Management:** Registers, memory, statistics, breakpoints, and exit status.
//! 2. **Commit Path:** Every architectural write goes through a `commit_*` method that
//!    records the old and new value in the pending [`StepDelta`] and notifies the
//!    [`ExecutionObserver`].
//! 3. **Rollback:** A fatal error restores the pending delta so state equals the last
//!    completed step.
//! 4. **Program Lifecycle:** Loading, reset, and the implicit end-of-program breakpoint.

/// CSR instruction execution and counter CSRs.
pub mod csr;

/// Integer and floating-point execution helpers shared by both executors.
pub mod execution;

/// Loads and stores sized by `funct3`.
pub mod memory;

/// `ecall` handling.
pub mod syscall;

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::common::RegisterFile;
use crate::common::error::{SimError, SimResult};
use crate::common::reg::RegisterClass;
use crate::config::Config;
use crate::core::arch::csr::is_counter;
use crate::core::arch::mode::IsaMode;
use crate::sim::breakpoints::Breakpoints;
use crate::sim::control::SimControl;
use crate::sim::journal::{MemoryChange, RegisterChange, StepDelta};
use crate::sim::loader::{self, AssembledProgram, LoadSummary};
use crate::sim::observer::{ExecutionObserver, NullObserver};
use crate::soc::memory::Memory;
use crate::stats::{InstructionClass, SimStats};

/// Architectural state of one VM session.
///
/// The register file and memory are exclusively owned; only the [`SimControl`]
/// handle is shared with other threads.
pub struct Cpu {
    /// General purpose, floating-point and control/status registers plus the PC.
    pub regs: RegisterFile,
    /// Guest memory.
    pub memory: Memory,
    /// Performance statistics.
    pub stats: SimStats,
    /// Instruction breakpoints.
    pub breakpoints: Breakpoints,

    config: Config,
    program: Option<AssembledProgram>,
    program_size: u64,
    exit_code: Option<i64>,
    control: Arc<SimControl>,
    observer: Box<dyn ExecutionObserver>,
    pending: StepDelta,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &self.regs.pc())
            .field("mode", &self.regs.mode())
            .field("program_size", &self.program_size)
            .field("exit_code", &self.exit_code)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a CPU from a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Session configuration; kept for reset and program loading.
    pub fn new(config: Config) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            regs: RegisterFile::new(&config),
            memory: Memory::new(&config),
            stats: SimStats::default(),
            breakpoints: Breakpoints::new(),
            control: Arc::new(SimControl::new(config.general.input_queue_capacity)),
            config,
            program: None,
            program_size: 0,
            exit_code: None,
            observer: Box::new(NullObserver),
            pending: StepDelta::new(0),
        })
    }

    /// Session configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Active ISA width.
    pub const fn mode(&self) -> IsaMode {
        self.regs.mode()
    }

    /// The loaded program, if any.
    pub const fn program(&self) -> Option<&AssembledProgram> {
        self.program.as_ref()
    }

    /// Byte address one past the last loaded instruction.
    pub const fn program_size(&self) -> u64 {
        self.program_size
    }

    /// Exit code once the program has executed the exit syscall.
    pub const fn exit_code(&self) -> Option<i64> {
        self.exit_code
    }

    /// Shared stop flag and input queue.
    pub const fn control(&self) -> &Arc<SimControl> {
        &self.control
    }

    /// Replaces the observer receiving commit events.
    pub fn set_observer(&mut self, observer: Box<dyn ExecutionObserver>) {
        self.observer = observer;
    }

    /// Validates and installs `program`, then resets the machine with it loaded.
    pub fn load_program(&mut self, program: AssembledProgram) -> SimResult<LoadSummary> {
        let summary = loader::validate(&program, &self.config)?;
        self.program = Some(program);
        self.reset()?;
        info!(
            program_size = summary.program_size,
            data_end = summary.data_end,
            "program loaded"
        );
        Ok(summary)
    }

    /// Restores architectural defaults and rewrites the loaded program image.
    ///
    /// Statistics and the exit status are cleared; breakpoints are kept.
    pub fn reset(&mut self) -> SimResult<()> {
        self.regs.reset();
        self.memory.reset();
        self.stats = SimStats::default();
        self.exit_code = None;
        self.pending = StepDelta::new(0);
        self.control.clear_stop();
        self.program_size = 0;
        if let Some(program) = &self.program {
            loader::write_sections(program, &self.config, &mut self.memory)?;
            self.program_size = program.program_size();
        }
        self.breakpoints.set_program_end(self.program_size);
        info!(program_size = self.program_size, "machine reset");
        Ok(())
    }

    /// Opens a new pending delta for a step starting at the current PC.
    pub(crate) fn begin_step(&mut self) {
        self.pending = StepDelta::new(self.regs.pc());
    }

    /// Closes the pending delta, stamping the current PC and retirement class.
    pub(crate) fn finish_step(&mut self, class: Option<InstructionClass>) -> StepDelta {
        let mut delta = std::mem::replace(&mut self.pending, StepDelta::new(self.regs.pc()));
        delta.new_pc = self.regs.pc();
        delta.class = class;
        delta
    }

    /// Drops the pending delta and keeps everything committed since [`Cpu::begin_step`].
    pub(crate) fn discard_step(&mut self) {
        self.pending = StepDelta::new(self.regs.pc());
    }

    /// Undoes everything committed since [`Cpu::begin_step`].
    pub(crate) fn rollback_step(&mut self) {
        let delta = std::mem::replace(&mut self.pending, StepDelta::new(self.regs.pc()));
        self.restore(&delta, false);
        self.regs.set_pc(delta.old_pc);
        if delta.exit_code.is_some() {
            self.exit_code = None;
        }
    }

    /// Reports a recoverable error to the log and the observer.
    pub(crate) fn report(&mut self, error: &SimError) {
        warn!(%error, "instruction skipped");
        self.observer.on_warning(error);
    }

    /// Emits console output produced by a syscall.
    pub(crate) fn emit_output(&mut self, text: &str) {
        self.observer.on_output(text);
    }

    /// Writes an integer register and records the change. Writes to `x0` are dropped.
    pub fn commit_gpr(&mut self, idx: usize, val: u64) -> SimResult<()> {
        let old = self.regs.read_gpr(idx)?;
        if idx == 0 {
            return Ok(());
        }
        self.regs.write_gpr(idx, val)?;
        let new = self.regs.read_gpr(idx)?;
        self.record_register(RegisterClass::Gpr, idx, old, new);
        Ok(())
    }

    /// Writes a floating-point register and records the change.
    pub fn commit_fpr(&mut self, idx: usize, val: u64) -> SimResult<()> {
        let old = self.regs.read_fpr(idx)?;
        self.regs.write_fpr(idx, val)?;
        self.record_register(RegisterClass::Fpr, idx, old, val);
        Ok(())
    }

    /// Writes a CSR and records the change. Writes to the counter CSRs are ignored.
    pub fn commit_csr(&mut self, addr: u64, val: u64) -> SimResult<()> {
        let old = self.regs.read_csr(addr)?;
        if is_counter(addr as u16) {
            return Ok(());
        }
        self.regs.write_csr(addr, val)?;
        let new = self.regs.read_csr(addr)?;
        self.record_register(RegisterClass::Csr, addr as usize, old, new);
        Ok(())
    }

    /// Writes `bytes` to memory at `address` and records the change.
    pub fn commit_memory(&mut self, address: u64, bytes: &[u8]) -> SimResult<()> {
        let old = self.memory.read_bytes(address, bytes.len())?;
        self.memory.write_bytes(address, bytes)?;
        self.pending.memory_changes.push(MemoryChange {
            address,
            old,
            new: bytes.to_vec(),
        });
        self.observer.on_memory_update(address, bytes);
        Ok(())
    }

    /// Marks the program as exited with `code`.
    pub fn commit_exit(&mut self, code: i64) {
        self.exit_code = Some(code);
        self.pending.exit_code = Some(code);
        self.observer.on_exit(code);
        info!(code, "program exited");
    }

    fn record_register(&mut self, class: RegisterClass, index: usize, old: u64, new: u64) {
        self.pending.register_changes.push(RegisterChange {
            class,
            index,
            old,
            new,
        });
        self.observer.on_register_update(class, index, new);
    }

    /// Applies a delta's old values (`forward == false`) or new values (`forward == true`).
    ///
    /// Registers and memory are restored in reverse commit order when rewinding so
    /// that several writes to one location end at the oldest value. The PC, exit
    /// status and statistics are handled by the caller.
    pub(crate) fn restore(&mut self, delta: &StepDelta, forward: bool) {
        let mut apply_reg = |cpu: &mut Self, change: &RegisterChange| {
            let value = if forward { change.new } else { change.old };
            if cpu.regs.write(change.class, change.index, value).is_ok() {
                cpu.observer.on_register_update(change.class, change.index, value);
            }
        };
        if forward {
            for change in &delta.register_changes {
                apply_reg(self, change);
            }
        } else {
            for change in delta.register_changes.iter().rev() {
                apply_reg(self, change);
            }
        }

        let mut apply_mem = |cpu: &mut Self, change: &MemoryChange| {
            let bytes = if forward { &change.new } else { &change.old };
            if cpu.memory.write_bytes(change.address, bytes).is_ok() {
                cpu.observer.on_memory_update(change.address, bytes);
            }
        };
        if forward {
            for change in &delta.memory_changes {
                apply_mem(self, change);
            }
        } else {
            for change in delta.memory_changes.iter().rev() {
                apply_mem(self, change);
            }
        }
    }

    /// Rewinds one journaled step: state, PC, exit status and counters.
    pub(crate) fn undo_delta(&mut self, delta: &StepDelta) {
        self.restore(delta, false);
        self.regs.set_pc(delta.old_pc);
        if delta.exit_code.is_some() {
            self.exit_code = None;
        }
        self.stats.cycles = self.stats.cycles.saturating_sub(1);
        if let Some(class) = delta.class {
            self.stats.retract_retire(class);
        }
    }

    /// Replays one journaled step forward.
    pub(crate) fn redo_delta(&mut self, delta: &StepDelta) {
        self.restore(delta, true);
        self.regs.set_pc(delta.new_pc);
        if let Some(code) = delta.exit_code {
            self.exit_code = Some(code);
            self.observer.on_exit(code);
        }
        self.stats.cycles += 1;
        if let Some(class) = delta.class {
            self.stats.record_retire(class);
        }
    }
}
