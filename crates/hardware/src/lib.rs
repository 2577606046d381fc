//! RISC-V instruction-set simulator library.
//!
//! This crate implements an RV32/RV64 IMFD simulator for teaching and debugging with
//! the following:
//! 1. **Core:** GPR/FPR/CSR state, the integer ALU and IEEE 754 FPU, and the control decoder.
//! 2. **Executors:** A single-cycle engine and a five-stage pipeline with hazard
//!    detection, forwarding, and flushes.
//! 3. **ISA:** Field extraction, immediates, and a data-driven encoding table.
//! 4. **Memory:** A sparse, bounds-checked, little-endian address space.
//! 5. **Simulation:** Program loading, breakpoints, undo/redo, syscalls, observers,
//!    configuration, and statistics.

/// Common types and constants (errors, register classes, sizes).
pub mod common;
/// Simulator configuration (defaults, ISA width, executor selection).
pub mod config;
/// CPU core (architectural state, control, pipeline, functional units).
pub mod core;
/// Instruction set (field extraction, immediates, opcodes, encoding table, ABI).
pub mod isa;
/// Executors, simulator facade, loader, breakpoints, journal, and observers.
pub mod sim;
/// Guest memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural state shared by both executors.
pub use crate::core::Cpu;
/// Executor interface and the reasons a run stops.
pub use crate::sim::{Executor, HaltReason};
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
