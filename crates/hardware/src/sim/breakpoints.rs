//! Instruction breakpoints.
//!
//! Breakpoints are byte addresses of instructions and must be multiples of 4.
//! Loading a program installs an implicit breakpoint at the end of the text
//! section; it is tracked separately so that clearing user breakpoints keeps it.

use std::collections::BTreeSet;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{SimError, SimResult};

/// Set of breakpoint addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Breakpoints {
    user: BTreeSet<u64>,
    program_end: Option<u64>,
}

impl Breakpoints {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a breakpoint; returns false if it was already set.
    ///
    /// # Errors
    ///
    /// [`SimError::MisalignedBreakpoint`] if `address` is not a multiple of 4.
    pub fn add(&mut self, address: u64) -> SimResult<bool> {
        if address % INSTRUCTION_SIZE != 0 {
            return Err(SimError::MisalignedBreakpoint(address));
        }
        Ok(self.user.insert(address))
    }

    /// Removes a breakpoint; returns false if none was set.
    pub fn remove(&mut self, address: u64) -> bool {
        self.user.remove(&address)
    }

    /// True if execution should halt at `address`.
    pub fn contains(&self, address: u64) -> bool {
        self.program_end == Some(address) || self.user.contains(&address)
    }

    /// Installs the implicit end-of-program breakpoint.
    pub const fn set_program_end(&mut self, address: u64) {
        self.program_end = Some(address);
    }

    /// Address of the implicit end-of-program breakpoint.
    pub const fn program_end(&self) -> Option<u64> {
        self.program_end
    }

    /// User breakpoints in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.user.iter().copied()
    }

    /// Number of user breakpoints.
    pub fn len(&self) -> usize {
        self.user.len()
    }

    /// True if no user breakpoint is set.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty()
    }

    /// Removes every user breakpoint.
    pub fn clear(&mut self) {
        self.user.clear();
    }
}
