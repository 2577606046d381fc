//! RISC-V General-Purpose Register File.
//!
//! This module implements the integer register storage. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Register `x0` reads as zero and discards writes.

/// Number of integer registers.
pub const GPR_COUNT: usize = 32;

/// General-Purpose Register file.
///
/// Indices are expected to be in range; bounds are validated by
/// [`RegisterFile`](crate::common::reg::RegisterFile) before reaching this type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; GPR_COUNT],
}

impl Gpr {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`. Register `x0` always returns 0.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes register `idx`. Writes to `x0` are dropped.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Clears every register.
    pub fn clear(&mut self) {
        self.regs = [0; GPR_COUNT];
    }
}
