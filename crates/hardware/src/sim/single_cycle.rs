//! Single-cycle executor.
//!
//! Every step fetches, decodes, executes, accesses memory and writes back one
//! instruction, counting one cycle. It provides:
//! 1. **Error policy:** Recoverable errors are reported and the instruction retires as a
//!    no-op; fatal errors roll the step back and propagate.
//! 2. **Run loop:** Stops on exit, end of text, breakpoints, stop requests, and the
//!    optional instruction limit.
//! 3. **Reversibility:** Debug steps record a [`StepDelta`] in the [`StepJournal`] for
//!    undo and redo.

use tracing::{debug, info};

use crate::common::error::SimResult;
use crate::config::{Config, ExecutorKind};
use crate::core::Cpu;
use crate::core::cpu::syscall::SyscallOutcome;
use crate::sim::executor::{Executor, HaltReason};
use crate::sim::journal::{StepDelta, StepJournal};
use crate::stats::InstructionClass;

/// Result of one attempted instruction.
enum Attempt {
    /// The instruction retired.
    Retired(StepDelta),
    /// A read syscall was cancelled; nothing changed.
    Interrupted,
}

/// Executor that completes one instruction per step.
#[derive(Debug)]
pub struct SingleCycleExecutor {
    cpu: Cpu,
    journal: StepJournal,
}

impl SingleCycleExecutor {
    /// Creates an executor with a fresh CPU.
    pub fn new(config: Config) -> SimResult<Self> {
        let limit = config.general.undo_history_limit;
        Ok(Self {
            cpu: Cpu::new(config)?,
            journal: StepJournal::new(limit),
        })
    }

    /// The undo/redo journal.
    pub const fn journal(&self) -> &StepJournal {
        &self.journal
    }

    /// Halt condition that prevents executing another instruction.
    fn halted(&self) -> Option<HaltReason> {
        if let Some(code) = self.cpu.exit_code() {
            return Some(HaltReason::Exit(code));
        }
        (self.cpu.regs.pc() >= self.cpu.program_size()).then_some(HaltReason::ProgramEnd)
    }

    /// Halt condition reached by the instruction that just retired.
    fn halt_after_step(&self) -> Option<HaltReason> {
        if let Some(halt) = self.halted() {
            return Some(halt);
        }
        let pc = self.cpu.regs.pc();
        self.cpu.breakpoints.contains(pc).then_some(HaltReason::Breakpoint(pc))
    }

    fn attempt(&mut self) -> SimResult<Attempt> {
        let cpu = &mut self.cpu;
        cpu.begin_step();
        let pc = cpu.regs.pc();
        let word = cpu.fetch()?;
        let class = InstructionClass::of(word);

        match cpu.execute_instruction(pc, word) {
            Ok(SyscallOutcome::Interrupted) => {
                cpu.rollback_step();
                // The stop is consumed here so a later step can block on input again.
                cpu.control().clear_stop();
                return Ok(Attempt::Interrupted);
            }
            Ok(SyscallOutcome::Continue | SyscallOutcome::Exit(_)) => {}
            // Recoverable errors are raised before anything is committed.
            Err(error) if !error.is_fatal() => cpu.report(&error),
            Err(error) => {
                cpu.rollback_step();
                return Err(error);
            }
        }

        cpu.stats.cycles += 1;
        cpu.stats.record_retire(class);
        Ok(Attempt::Retired(cpu.finish_step(Some(class))))
    }

    fn step_inner(&mut self, journaled: bool) -> SimResult<Option<HaltReason>> {
        if let Some(halt) = self.halted() {
            return Ok(Some(halt));
        }
        match self.attempt()? {
            Attempt::Interrupted => Ok(Some(HaltReason::StopRequested)),
            Attempt::Retired(delta) => {
                if journaled {
                    self.journal.push(delta);
                } else {
                    self.journal.clear();
                }
                Ok(self.halt_after_step())
            }
        }
    }

    fn run_loop(&mut self, journaled: bool) -> SimResult<HaltReason> {
        let limit = self.cpu.config().general.instruction_execution_limit;
        let mut retired = 0u64;
        let halt = loop {
            let control = self.cpu.control();
            if control.is_stop_requested() {
                control.clear_stop();
                break HaltReason::StopRequested;
            }
            if let Some(halt) = self.halted() {
                break halt;
            }
            if limit.is_some_and(|limit| retired >= limit) {
                break HaltReason::InstructionLimit;
            }
            let halt = self.step_inner(journaled)?;
            retired += 1;
            if let Some(halt) = halt {
                break halt;
            }
        };
        match halt {
            HaltReason::Breakpoint(pc) => debug!(pc, "breakpoint hit"),
            _ => info!(%halt, pc = self.cpu.regs.pc(), "run halted"),
        }
        Ok(halt)
    }
}

impl Executor for SingleCycleExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::SingleCycle
    }

    fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    fn step(&mut self) -> SimResult<Option<HaltReason>> {
        self.step_inner(false)
    }

    fn run(&mut self) -> SimResult<HaltReason> {
        self.run_loop(false)
    }

    fn debug_step(&mut self) -> SimResult<Option<HaltReason>> {
        self.step_inner(true)
    }

    fn debug_run(&mut self) -> SimResult<HaltReason> {
        self.run_loop(true)
    }

    fn undo(&mut self) -> SimResult<bool> {
        let Some(delta) = self.journal.pop_undo() else {
            return Ok(false);
        };
        self.cpu.undo_delta(&delta);
        debug!(pc = delta.old_pc, "undo");
        self.journal.push_redo(delta);
        Ok(true)
    }

    fn redo(&mut self) -> SimResult<bool> {
        let Some(delta) = self.journal.pop_redo() else {
            return Ok(false);
        };
        self.cpu.redo_delta(&delta);
        debug!(pc = delta.new_pc, "redo");
        self.journal.push_undo_from_redo(delta);
        Ok(true)
    }

    fn reset(&mut self) -> SimResult<()> {
        self.journal.clear();
        self.cpu.reset()
    }
}
