//! Core processor implementation.
//!
//! This module contains the architectural state and the datapath pieces shared by
//! both executors: the register and CSR definitions, the control decoder, the CPU
//! state with its journaled commit path, the pipeline building blocks, and the
//! functional units.

/// Architecture-specific components (CSRs, register files, ISA width).
pub mod arch;

/// Control signal and ALU operation decoder.
pub mod control;

/// CPU state and single-instruction execution.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, FPU).
pub mod units;

pub use self::cpu::Cpu;
