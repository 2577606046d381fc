//! Sparse Block Buffer.
//!
//! Backing storage for guest memory. The address space is split into fixed-size
//! blocks that are allocated on first write; reading an unallocated block yields
//! zeros. This keeps a multi-gigabyte address space cheap when programs only touch
//! their text, data, and stack.

use std::collections::HashMap;

/// Lazily allocated, block-granular byte store.
///
/// The buffer performs no bounds checks of its own; [`Memory`](super::Memory)
/// validates every access against the configured address-space size first.
#[derive(Clone, Debug)]
pub struct BlockBuffer {
    blocks: HashMap<u64, Box<[u8]>>,
    block_size: u64,
    shift: u32,
}

impl BlockBuffer {
    /// Creates an empty buffer.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Block granule in bytes; must be a power of two.
    pub fn new(block_size: u64) -> Self {
        Self {
            blocks: HashMap::new(),
            block_size,
            shift: block_size.trailing_zeros(),
        }
    }

    /// Block granule in bytes.
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Number of blocks currently allocated.
    pub fn allocated_blocks(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    const fn split(&self, addr: u64) -> (u64, usize) {
        (addr >> self.shift, (addr & (self.block_size - 1)) as usize)
    }

    /// Reads one byte; unallocated blocks read as zero.
    #[inline]
    pub fn read_u8(&self, addr: u64) -> u8 {
        let (block, offset) = self.split(addr);
        self.blocks.get(&block).map_or(0, |b| b[offset])
    }

    /// Writes one byte, allocating its block if needed.
    #[inline]
    pub fn write_u8(&mut self, addr: u64, val: u8) {
        let (block, offset) = self.split(addr);
        let size = self.block_size as usize;
        let storage = self
            .blocks
            .entry(block)
            .or_insert_with(|| vec![0; size].into_boxed_slice());
        storage[offset] = val;
    }

    /// Fills `out` with the bytes starting at `addr`.
    ///
    /// Composes the access byte by byte so it may straddle block boundaries.
    pub fn read_into(&self, addr: u64, out: &mut [u8]) {
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u64));
        }
    }

    /// Writes `data` starting at `addr`.
    pub fn write_from(&mut self, addr: u64, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u64), byte);
        }
    }

    /// Drops every allocated block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
