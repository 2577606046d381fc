//! Simulator error taxonomy.
//!
//! This module defines the single error type surfaced by the execution engine. It provides:
//! 1. **Fatal errors:** Out-of-range memory, register, or CSR accesses and invalid configuration.
//!    These abort the current step and leave the machine as of the last completed step.
//! 2. **Recoverable errors:** Instructions that cannot be executed in the current mode or
//!    executor. These are reported through the observer and the instruction is skipped.
//! 3. **Result alias:** [`SimResult`] for fallible engine operations.

use thiserror::Error;

use crate::common::reg::RegisterClass;
use crate::core::arch::mode::IsaMode;

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Errors produced by the simulator core.
#[derive(Debug, Error)]
pub enum SimError {
    /// A memory access touched bytes at or beyond the configured address-space size.
    #[error("memory access out of range: {size} byte(s) at {address:#x} (memory size {memory_size:#x})")]
    MemoryOutOfRange {
        /// First byte of the access.
        address: u64,
        /// Width of the access in bytes.
        size: u64,
        /// Configured address-space size.
        memory_size: u64,
    },

    /// A register index outside the architectural file was requested.
    #[error("invalid {class} register index {index}")]
    InvalidRegister {
        /// Register file that was addressed.
        class: RegisterClass,
        /// Offending index.
        index: usize,
    },

    /// A CSR address outside the 12-bit CSR space was requested.
    #[error("invalid CSR address {0:#x}")]
    InvalidCsr(u64),

    /// The instruction requires a wider ISA than the one configured.
    #[error("instruction {word:#010x} at pc {pc:#x} is not supported in {mode} mode")]
    UnsupportedInMode {
        /// Address of the instruction.
        pc: u64,
        /// Raw instruction word.
        word: u32,
        /// Active ISA mode.
        mode: IsaMode,
    },

    /// The pipelined executor does not model this instruction class.
    #[error("instruction {word:#010x} at pc {pc:#x} is not supported by the pipelined executor")]
    UnsupportedInPipeline {
        /// Address of the instruction.
        pc: u64,
        /// Raw instruction word.
        word: u32,
    },

    /// A floating-point instruction selected a reserved rounding mode.
    #[error("reserved rounding mode {rm} for instruction at pc {pc:#x}")]
    InvalidRoundingMode {
        /// Address of the instruction.
        pc: u64,
        /// Rounding-mode field after dynamic resolution.
        rm: u8,
    },

    /// `ecall` with a syscall number the simulator does not know.
    #[error("unknown syscall {number} at pc {pc:#x}")]
    UnknownSyscall {
        /// Address of the `ecall`.
        pc: u64,
        /// Value of `a7`.
        number: u64,
    },

    /// Breakpoints must sit on instruction boundaries.
    #[error("breakpoint address {0:#x} is not a multiple of 4")]
    MisalignedBreakpoint(u64),

    /// No instruction is mapped to the requested source line.
    #[error("no instruction on source line {0}")]
    UnknownLine(usize),

    /// The bounded input queue is full.
    #[error("input queue is full (capacity {capacity})")]
    InputQueueFull {
        /// Configured queue capacity.
        capacity: usize,
    },

    /// Undo/redo was requested from an executor that does not journal.
    #[error("undo/redo is not available for this executor")]
    UndoUnavailable,

    /// The program does not fit into the configured address space.
    #[error("program section at {start:#x} with {len} byte(s) does not fit below {limit:#x}")]
    ProgramTooLarge {
        /// Section base address.
        start: u64,
        /// Section length in bytes.
        len: u64,
        /// Upper bound the section must stay below.
        limit: u64,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration or program file could not be parsed.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration or program file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Returns true if the error aborts the current step.
    ///
    /// Recoverable errors are reported and the offending instruction is skipped;
    /// execution continues with the next instruction.
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnsupportedInMode { .. }
                | Self::UnsupportedInPipeline { .. }
                | Self::InvalidRoundingMode { .. }
                | Self::UnknownSyscall { .. }
                | Self::InputQueueFull { .. }
                | Self::UndoUnavailable
                | Self::MisalignedBreakpoint(_)
                | Self::UnknownLine(_)
        )
    }
}
