//! Guest Memory.
//!
//! This module implements the byte-addressable guest address space. It provides:
//! 1. **Buffer:** Sparse block storage (`BlockBuffer`) allocated on first write.
//! 2. **Bounds Checking:** Every access is validated against the configured
//!    address-space size; violations fail with [`SimError::MemoryOutOfRange`].
//! 3. **Typed Access:** Little-endian byte/half/word/double and float/double helpers.
//!    Accesses need not be aligned.

/// Sparse block storage backing guest memory.
pub mod buffer;

use self::buffer::BlockBuffer;
use crate::common::error::{SimError, SimResult};
use crate::config::Config;

/// Bounds-checked, little-endian guest memory.
#[derive(Clone, Debug)]
pub struct Memory {
    buffer: BlockBuffer,
    memory_size: u64,
}

impl Memory {
    /// Creates an empty memory sized by `config.memory`.
    pub fn new(config: &Config) -> Self {
        Self {
            buffer: BlockBuffer::new(config.memory.block_size),
            memory_size: config.memory.memory_size,
        }
    }

    /// Size of the address space in bytes.
    pub const fn size(&self) -> u64 {
        self.memory_size
    }

    /// Number of blocks currently backed by host memory.
    pub fn allocated_blocks(&self) -> usize {
        self.buffer.allocated_blocks()
    }

    /// Drops all contents.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Validates that `[address, address + size)` lies inside the address space.
    pub fn check_range(&self, address: u64, size: u64) -> SimResult<()> {
        let in_range = match size {
            0 => address <= self.memory_size,
            _ => address
                .checked_add(size - 1)
                .is_some_and(|last| last < self.memory_size),
        };
        if in_range {
            Ok(())
        } else {
            Err(SimError::MemoryOutOfRange {
                address,
                size,
                memory_size: self.memory_size,
            })
        }
    }

    /// Reads `len` bytes starting at `address`.
    pub fn read_bytes(&self, address: u64, len: usize) -> SimResult<Vec<u8>> {
        self.check_range(address, len as u64)?;
        let mut out = vec![0; len];
        self.buffer.read_into(address, &mut out);
        Ok(out)
    }

    /// Writes `data` starting at `address`.
    pub fn write_bytes(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        self.check_range(address, data.len() as u64)?;
        self.buffer.write_from(address, data);
        Ok(())
    }

    fn read_array<const N: usize>(&self, address: u64) -> SimResult<[u8; N]> {
        self.check_range(address, N as u64)?;
        let mut out = [0; N];
        self.buffer.read_into(address, &mut out);
        Ok(out)
    }

    /// Reads a byte.
    pub fn read_byte(&self, address: u64) -> SimResult<u8> {
        self.check_range(address, 1)?;
        Ok(self.buffer.read_u8(address))
    }

    /// Reads a half-word (16-bit, little-endian).
    pub fn read_half_word(&self, address: u64) -> SimResult<u16> {
        self.read_array(address).map(u16::from_le_bytes)
    }

    /// Reads a word (32-bit, little-endian).
    pub fn read_word(&self, address: u64) -> SimResult<u32> {
        self.read_array(address).map(u32::from_le_bytes)
    }

    /// Reads a double-word (64-bit, little-endian).
    pub fn read_double_word(&self, address: u64) -> SimResult<u64> {
        self.read_array(address).map(u64::from_le_bytes)
    }

    /// Reads a single-precision float.
    pub fn read_float(&self, address: u64) -> SimResult<f32> {
        self.read_word(address).map(f32::from_bits)
    }

    /// Reads a double-precision float.
    pub fn read_double(&self, address: u64) -> SimResult<f64> {
        self.read_double_word(address).map(f64::from_bits)
    }

    /// Writes a byte.
    pub fn write_byte(&mut self, address: u64, val: u8) -> SimResult<()> {
        self.check_range(address, 1)?;
        self.buffer.write_u8(address, val);
        Ok(())
    }

    /// Writes a half-word (16-bit, little-endian).
    pub fn write_half_word(&mut self, address: u64, val: u16) -> SimResult<()> {
        self.write_bytes(address, &val.to_le_bytes())
    }

    /// Writes a word (32-bit, little-endian).
    pub fn write_word(&mut self, address: u64, val: u32) -> SimResult<()> {
        self.write_bytes(address, &val.to_le_bytes())
    }

    /// Writes a double-word (64-bit, little-endian).
    pub fn write_double_word(&mut self, address: u64, val: u64) -> SimResult<()> {
        self.write_bytes(address, &val.to_le_bytes())
    }

    /// Writes a single-precision float.
    pub fn write_float(&mut self, address: u64, val: f32) -> SimResult<()> {
        self.write_word(address, val.to_bits())
    }

    /// Writes a double-precision float.
    pub fn write_double(&mut self, address: u64, val: f64) -> SimResult<()> {
        self.write_double_word(address, val.to_bits())
    }

    /// Reads `size` bytes (1, 2, 4, or 8) as a zero-extended little-endian value.
    pub fn read_sized(&self, address: u64, size: usize) -> SimResult<u64> {
        let mut bytes = [0u8; 8];
        let width = size.min(8);
        self.check_range(address, width as u64)?;
        self.buffer.read_into(address, &mut bytes[..width]);
        Ok(u64::from_le_bytes(bytes))
    }
}
