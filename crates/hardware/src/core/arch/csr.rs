//! Control and Status Register (CSR) definitions and storage.
//!
//! This module implements the CSR space visible to user programs. It provides:
//! 1. **Address Definitions:** Constants for the floating-point and counter CSRs.
//! 2. **Field Masks:** Bitmasks and shifts for the `fcsr` sub-fields.
//! 3. **Register Storage:** The `Csrs` struct backing the full 12-bit address space.
//! 4. **Aliasing:** `fflags` and `frm` are views of `fcsr`; reads and writes through
//!    any of the three addresses stay consistent.

/// Number of addressable CSRs (12-bit address space).
pub const CSR_COUNT: usize = 4096;

/// Floating-point accrued exception flags.
pub const FFLAGS: u16 = 0x001;

/// Floating-point dynamic rounding mode.
pub const FRM: u16 = 0x002;

/// Floating-point control and status register (`frm` << 5 | `fflags`).
pub const FCSR: u16 = 0x003;

/// Cycle counter (read-only).
pub const CYCLE: u16 = 0xC00;

/// Real-time counter (read-only, mirrors `cycle`).
pub const TIME: u16 = 0xC01;

/// Instructions retired counter (read-only).
pub const INSTRET: u16 = 0xC02;

/// Mask of the five exception flag bits.
pub const FFLAGS_MASK: u64 = 0x1F;

/// Bit position of `frm` inside `fcsr`.
pub const FRM_SHIFT: u64 = 5;

/// Mask of the three rounding-mode bits (after shifting).
pub const FRM_MASK: u64 = 0x7;

/// Mask of the implemented `fcsr` bits.
pub const FCSR_MASK: u64 = (FRM_MASK << FRM_SHIFT) | FFLAGS_MASK;

/// Returns true for the read-only user counter CSRs.
pub const fn is_counter(addr: u16) -> bool {
    matches!(addr, CYCLE | TIME | INSTRET)
}

/// Backing storage for the CSR space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Csrs {
    regs: Box<[u64]>,
}

impl Default for Csrs {
    fn default() -> Self {
        Self {
            regs: vec![0; CSR_COUNT].into_boxed_slice(),
        }
    }
}

impl Csrs {
    /// Creates a cleared CSR file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a CSR. `addr` must be below [`CSR_COUNT`].
    ///
    /// `fflags` and `frm` are extracted from `fcsr`.
    pub fn read(&self, addr: u16) -> u64 {
        let fcsr = self.regs[FCSR as usize];
        match addr {
            FFLAGS => fcsr & FFLAGS_MASK,
            FRM => (fcsr >> FRM_SHIFT) & FRM_MASK,
            FCSR => fcsr & FCSR_MASK,
            _ => self.regs[addr as usize],
        }
    }

    /// Writes a CSR. `addr` must be below [`CSR_COUNT`].
    ///
    /// Writes to `fflags`/`frm` update the corresponding `fcsr` field only.
    pub fn write(&mut self, addr: u16, val: u64) {
        let fcsr = self.regs[FCSR as usize];
        match addr {
            FFLAGS => self.regs[FCSR as usize] = (fcsr & !FFLAGS_MASK) | (val & FFLAGS_MASK),
            FRM => {
                self.regs[FCSR as usize] =
                    (fcsr & !(FRM_MASK << FRM_SHIFT)) | ((val & FRM_MASK) << FRM_SHIFT);
            }
            FCSR => self.regs[FCSR as usize] = val & FCSR_MASK,
            _ => self.regs[addr as usize] = val,
        }
    }

    /// Current dynamic rounding mode field (`frm`).
    pub fn frm(&self) -> u8 {
        self.read(FRM) as u8
    }

    /// Clears every CSR.
    pub fn clear(&mut self) {
        self.regs.fill(0);
    }
}
