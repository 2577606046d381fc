//! RISC-V Floating-Point Register File.
//!
//! Registers are 64-bit slots. Single-precision values are stored NaN-boxed
//! (upper 32 bits all ones); double-precision values use the full slot.

/// Number of floating-point registers.
pub const FPR_COUNT: usize = 32;

/// Floating-Point Register file holding raw IEEE 754 bit patterns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fpr {
    fregs: [u64; FPR_COUNT],
}

impl Fpr {
    /// Creates a register file with every register cleared to `+0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the raw bits of register `idx`.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        self.fregs[idx]
    }

    /// Writes the raw bits of register `idx`.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        self.fregs[idx] = val;
    }

    /// Clears every register.
    pub fn clear(&mut self) {
        self.fregs = [0; FPR_COUNT];
    }
}
