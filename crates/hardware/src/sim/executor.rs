//! Executor interface.
//!
//! Both execution engines implement [`Executor`] over a shared [`Cpu`]:
//! 1. **Stepping:** `step` advances one instruction (single-cycle) or one clock (pipelined).
//! 2. **Running:** `run` loops until a [`HaltReason`], checking the stop flag once per step.
//! 3. **Debugging:** `debug_step`/`debug_run` additionally journal each retired instruction
//!    for `undo`/`redo` where the engine supports it.

use std::fmt;

use serde::Serialize;

use crate::common::error::{SimError, SimResult};
use crate::config::ExecutorKind;
use crate::core::Cpu;
use crate::sim::loader::{AssembledProgram, LoadSummary};

/// Why a run loop returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// The PC reached the end of the loaded text and the machine is idle.
    ProgramEnd,
    /// Execution reached a breakpoint at the given address.
    Breakpoint(u64),
    /// The program executed the exit syscall.
    Exit(i64),
    /// Another thread requested a stop.
    StopRequested,
    /// The configured instruction limit was reached.
    InstructionLimit,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProgramEnd => write!(f, "end of program"),
            Self::Breakpoint(pc) => write!(f, "breakpoint at {pc:#x}"),
            Self::Exit(code) => write!(f, "exit with code {code}"),
            Self::StopRequested => write!(f, "stop requested"),
            Self::InstructionLimit => write!(f, "instruction limit reached"),
        }
    }
}

/// Common interface of the single-cycle and pipelined engines.
pub trait Executor: fmt::Debug + Send {
    /// Which engine this is.
    fn kind(&self) -> ExecutorKind;

    /// Shared architectural state.
    fn cpu(&self) -> &Cpu;

    /// Mutable architectural state.
    fn cpu_mut(&mut self) -> &mut Cpu;

    /// Advances by one unit of work.
    ///
    /// # Returns
    ///
    /// `Some(reason)` if the machine is halted after (or was already halted before)
    /// this step.
    fn step(&mut self) -> SimResult<Option<HaltReason>>;

    /// Runs until a halt condition.
    fn run(&mut self) -> SimResult<HaltReason>;

    /// Like [`Executor::step`], also recording the step for undo.
    fn debug_step(&mut self) -> SimResult<Option<HaltReason>> {
        self.step()
    }

    /// Like [`Executor::run`], also recording every step for undo.
    fn debug_run(&mut self) -> SimResult<HaltReason> {
        self.run()
    }

    /// Reverts the most recent journaled step; `Ok(false)` if there is none.
    fn undo(&mut self) -> SimResult<bool> {
        Err(SimError::UndoUnavailable)
    }

    /// Re-applies the most recently undone step; `Ok(false)` if there is none.
    fn redo(&mut self) -> SimResult<bool> {
        Err(SimError::UndoUnavailable)
    }

    /// Returns the machine to its post-load state and drops engine-private state.
    fn reset(&mut self) -> SimResult<()>;

    /// True if no instruction is in flight.
    fn is_pipeline_empty(&self) -> bool {
        true
    }

    /// Installs a program and resets.
    fn load_program(&mut self, program: AssembledProgram) -> SimResult<LoadSummary> {
        let summary = self.cpu_mut().load_program(program)?;
        self.reset()?;
        Ok(summary)
    }
}
