//! Memory subsystem.
//!
//! The simulated machine has a single flat address space with no devices or
//! memory-mapped I/O; console and input traffic goes through syscalls instead.

/// Sparse, bounds-checked guest memory.
pub mod memory;
