//! Global simulator constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Instruction Constants:** Instruction width and the canonical no-op.
//! 2. **Syscall Numbers:** Values of `a7` recognized by `ecall`.

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Canonical no-op (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Print the signed integer in `a0`.
pub const SYSCALL_PRINT_INT: u64 = 1;

/// Print the single-precision value in `fa0`.
pub const SYSCALL_PRINT_FLOAT: u64 = 2;

/// Print the double-precision value in `fa0`.
pub const SYSCALL_PRINT_DOUBLE: u64 = 3;

/// Print the NUL-terminated string at address `a0`.
pub const SYSCALL_PRINT_STRING: u64 = 4;

/// Terminate the program with exit code `a0`.
pub const SYSCALL_EXIT: u64 = 10;

/// Read up to `a2` bytes from file descriptor `a0` into the buffer at `a1`.
pub const SYSCALL_READ: u64 = 63;

/// Write `a2` bytes from the buffer at `a1` to file descriptor `a0`.
pub const SYSCALL_WRITE: u64 = 64;

/// Longest string `print-string` will scan before giving up on a terminator.
pub const MAX_PRINT_STRING_LEN: u64 = 4096;
