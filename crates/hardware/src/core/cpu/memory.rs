//! Memory Access Helpers.
//!
//! This module provides the interface between the datapath and guest memory.
//! It performs the following:
//! 1. **Access Sizing:** Maps the `funct3` width field to a byte count.
//! 2. **Extension:** Sign- or zero-extends loaded values to register width.
//! 3. **Journaled Stores:** Routes every store through [`Cpu::commit_memory`] so that
//!    undo can restore the previous bytes.
//! 4. **FP Transfers:** `flw`/`fsw`/`fld`/`fsd`, with NaN boxing of single values.
//!
//! Accesses need no alignment; only the address-space bound is checked.

use super::Cpu;
use crate::common::error::SimResult;
use crate::core::units::fpu::nan_handling::box_f32;
use crate::isa::opcodes::width;

/// Number of bytes moved by a load or store with the given `funct3`.
pub const fn access_size(funct3: u32) -> usize {
    match funct3 & 0b011 {
        width::B => 1,
        width::H => 2,
        width::W => 4,
        _ => 8,
    }
}

/// Extends a zero-extended raw load value according to `funct3`.
pub const fn extend_load(funct3: u32, raw: u64) -> u64 {
    match funct3 {
        width::B => raw as u8 as i8 as i64 as u64,
        width::H => raw as u16 as i16 as i64 as u64,
        width::W => raw as u32 as i32 as i64 as u64,
        width::BU => raw as u8 as u64,
        width::HU => raw as u16 as u64,
        width::WU => raw as u32 as u64,
        _ => raw,
    }
}

impl Cpu {
    /// Performs an integer load.
    ///
    /// # Arguments
    ///
    /// * `address` - Effective address, already truncated to XLEN.
    /// * `funct3` - Width and signedness of the access.
    ///
    /// # Returns
    ///
    /// The loaded value extended to 64 bits.
    pub fn load(&self, address: u64, funct3: u32) -> SimResult<u64> {
        let raw = self.memory.read_sized(address, access_size(funct3))?;
        Ok(extend_load(funct3, raw))
    }

    /// Performs an integer store of the low bytes of `value`.
    pub fn store(&mut self, address: u64, funct3: u32, value: u64) -> SimResult<()> {
        let size = access_size(funct3);
        self.commit_memory(address, &value.to_le_bytes()[..size])
    }

    /// Performs an FP load; single-precision values are NaN-boxed.
    pub fn load_fp(&self, address: u64, funct3: u32) -> SimResult<u64> {
        if funct3 == width::W {
            Ok(box_f32(self.memory.read_word(address)?))
        } else {
            self.memory.read_double_word(address)
        }
    }

    /// Performs an FP store of the raw register bits (low word for `fsw`).
    pub fn store_fp(&mut self, address: u64, funct3: u32, bits: u64) -> SimResult<()> {
        let size = if funct3 == width::W { 4 } else { 8 };
        self.commit_memory(address, &bits.to_le_bytes()[..size])
    }
}
