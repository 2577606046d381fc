//! Simulation drivers and program loading.
//!
//! This module contains everything above the architectural core:
//! 1. **Executors:** The single-cycle and pipelined engines behind [`Executor`].
//! 2. **Facade:** [`Simulator`], which picks an executor from the configuration.
//! 3. **Debugging:** Breakpoints and the undo/redo journal.
//! 4. **Environment:** Program loading, the observer interface, and the stop flag
//!    and input queue shared with other threads.

/// Instruction breakpoints.
pub mod breakpoints;

/// Stop flag and bounded input queue.
pub mod control;

/// Executor trait and halt reasons.
pub mod executor;

/// Per-step change records for undo and redo.
pub mod journal;

/// Assembled-program artifact and section layout.
pub mod loader;

/// Execution observer interface.
pub mod observer;

/// Five-stage pipelined executor.
pub mod pipelined;

/// Simulator facade.
pub mod simulator;

/// Single-cycle executor.
pub mod single_cycle;

pub use executor::{Executor, HaltReason};
pub use simulator::Simulator;
