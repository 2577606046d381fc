//! RISC-V architectural state components.
//!
//! This module contains the storage that makes up the programmer-visible machine state.
//! It includes the following modules:
//! 1. **CSRs:** The 4096-entry CSR space with the floating-point status aliases.
//! 2. **FPRs:** Floating-point register storage holding NaN-boxed singles and doubles.
//! 3. **GPRs:** Integer register storage with `x0` hardwired to zero.
//! 4. **Modes:** RV32/RV64 width selection.

/// Control and Status Register (CSR) addresses and storage.
pub mod csr;

/// Floating-Point Register file implementation.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// ISA width (RV32/RV64) definitions.
pub mod mode;
