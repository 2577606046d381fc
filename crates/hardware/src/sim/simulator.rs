//! Simulator facade.
//!
//! [`Simulator`] owns one executor, chosen by `general.executor`, and exposes the
//! operations a front end needs:
//! 1. **Lifecycle:** Loading a program, resetting, and swapping the observer.
//! 2. **Execution:** Step, run, and their journaling debug variants, plus undo and redo.
//! 3. **Breakpoints:** By address or by source line through the program's line map.
//!
//! The stop flag and input queue are reached through [`Simulator::control`], whose
//! handle can be cloned into other threads.

use std::sync::Arc;

use tracing::debug;

use crate::common::error::{SimError, SimResult};
use crate::config::{Config, ExecutorKind};
use crate::core::Cpu;
use crate::sim::control::SimControl;
use crate::sim::executor::{Executor, HaltReason};
use crate::sim::loader::{AssembledProgram, LoadSummary};
use crate::sim::observer::ExecutionObserver;
use crate::sim::pipelined::PipelinedExecutor;
use crate::sim::single_cycle::SingleCycleExecutor;
use crate::stats::SimStats;

/// Top-level simulator: one configured executor over one CPU.
#[derive(Debug)]
pub struct Simulator {
    executor: Box<dyn Executor>,
}

impl Simulator {
    /// Builds a simulator from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: Config) -> SimResult<Self> {
        let executor: Box<dyn Executor> = match config.general.executor {
            ExecutorKind::SingleCycle => Box::new(SingleCycleExecutor::new(config)?),
            ExecutorKind::Pipelined => Box::new(PipelinedExecutor::new(config)?),
        };
        Ok(Self { executor })
    }

    /// Which executor is active.
    pub fn kind(&self) -> ExecutorKind {
        self.executor.kind()
    }

    /// Architectural state.
    pub fn cpu(&self) -> &Cpu {
        self.executor.cpu()
    }

    /// Mutable architectural state, for front ends that edit registers or memory.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        self.executor.cpu_mut()
    }

    /// The executor itself.
    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// Performance counters.
    pub fn stats(&self) -> &SimStats {
        &self.cpu().stats
    }

    /// Shared stop flag and input queue.
    pub fn control(&self) -> Arc<SimControl> {
        Arc::clone(self.cpu().control())
    }

    /// Replaces the execution observer.
    pub fn set_observer(&mut self, observer: Box<dyn ExecutionObserver>) {
        self.cpu_mut().set_observer(observer);
    }

    /// Loads `program` and resets the machine.
    pub fn load_program(&mut self, program: AssembledProgram) -> SimResult<LoadSummary> {
        self.executor.load_program(program)
    }

    /// Restores the post-load state.
    pub fn reset(&mut self) -> SimResult<()> {
        self.executor.reset()
    }

    /// See [`Executor::step`].
    pub fn step(&mut self) -> SimResult<Option<HaltReason>> {
        self.executor.step()
    }

    /// See [`Executor::run`].
    pub fn run(&mut self) -> SimResult<HaltReason> {
        self.executor.run()
    }

    /// See [`Executor::debug_step`].
    pub fn debug_step(&mut self) -> SimResult<Option<HaltReason>> {
        self.executor.debug_step()
    }

    /// See [`Executor::debug_run`].
    pub fn debug_run(&mut self) -> SimResult<HaltReason> {
        self.executor.debug_run()
    }

    /// See [`Executor::undo`].
    pub fn undo(&mut self) -> SimResult<bool> {
        self.executor.undo()
    }

    /// See [`Executor::redo`].
    pub fn redo(&mut self) -> SimResult<bool> {
        self.executor.redo()
    }

    /// Asks a running loop to stop before its next instruction.
    pub fn request_stop(&self) {
        self.cpu().control().request_stop();
    }

    /// True if no instruction is in flight.
    pub fn is_pipeline_empty(&self) -> bool {
        self.executor.is_pipeline_empty()
    }

    /// Adds a breakpoint at `address`; returns false if it was already set.
    pub fn add_breakpoint(&mut self, address: u64) -> SimResult<bool> {
        let added = self.cpu_mut().breakpoints.add(address)?;
        debug!(address, added, "add breakpoint");
        Ok(added)
    }

    /// Removes the breakpoint at `address`; returns false if none was set.
    pub fn remove_breakpoint(&mut self, address: u64) -> bool {
        self.cpu_mut().breakpoints.remove(address)
    }

    /// Adds a breakpoint on the first instruction of source `line`.
    ///
    /// # Returns
    ///
    /// The address of the breakpoint.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownLine`] if no loaded instruction maps to `line`.
    pub fn add_line_breakpoint(&mut self, line: usize) -> SimResult<u64> {
        let address = self.line_address(line)?;
        let _ = self.add_breakpoint(address)?;
        Ok(address)
    }

    /// Removes the breakpoint on source `line`; returns false if none was set.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownLine`] if no loaded instruction maps to `line`.
    pub fn remove_line_breakpoint(&mut self, line: usize) -> SimResult<bool> {
        let address = self.line_address(line)?;
        Ok(self.remove_breakpoint(address))
    }

    fn line_address(&self, line: usize) -> SimResult<u64> {
        self.cpu()
            .program()
            .and_then(|program| program.line_to_instruction.get(&line).copied())
            .map(AssembledProgram::instruction_address)
            .ok_or(SimError::UnknownLine(line))
    }

    /// Removes every user breakpoint; the end-of-program breakpoint stays.
    pub fn clear_breakpoints(&mut self) {
        self.cpu_mut().breakpoints.clear();
    }
}
