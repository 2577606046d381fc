//! Execution units and functional components.
//!
//! This module contains the stateless functional units shared by both executors:
//! the integer ALU and the IEEE 754 floating-point unit.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Floating-Point Unit for IEEE 754 operations.
pub mod fpu;
