//! Environment calls.
//!
//! `ecall` takes the service number from `a7` and its arguments from `a0`..`a2`
//! (`fa0` for the floating-point printers). Supported services:
//! 1. **Console output:** print-int, print-float, print-double, print-string and
//!    write to fd 1/2, delivered through the observer.
//! 2. **Console input:** read from fd 0, blocking on the [`SimControl`](crate::sim::control::SimControl)
//!    input queue.
//! 3. **Exit:** records the exit code; the executors halt afterwards.

use tracing::debug;

use super::Cpu;
use crate::common::constants::{
    MAX_PRINT_STRING_LEN, SYSCALL_EXIT, SYSCALL_PRINT_DOUBLE, SYSCALL_PRINT_FLOAT,
    SYSCALL_PRINT_INT, SYSCALL_PRINT_STRING, SYSCALL_READ, SYSCALL_WRITE,
};
use crate::common::error::{SimError, SimResult};
use crate::core::units::fpu::nan_handling::unbox_f32;
use crate::isa::abi::{REG_A0, REG_A1, REG_A2, REG_A7, REG_FA0};

/// File descriptor of standard input.
const FD_STDIN: u64 = 0;
/// File descriptor of standard output.
const FD_STDOUT: u64 = 1;
/// File descriptor of standard error.
const FD_STDERR: u64 = 2;

/// What the executor should do after an `ecall`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyscallOutcome {
    /// Continue with the next instruction.
    Continue,
    /// The program exited with the given code.
    Exit(i64),
    /// A blocking read was cancelled by a stop request; the `ecall` did not retire.
    Interrupted,
}

impl Cpu {
    /// Executes the service selected by `a7`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the `ecall`, for error reporting.
    ///
    /// # Returns
    ///
    /// The [`SyscallOutcome`], or [`SimError::UnknownSyscall`] for an unknown number.
    pub(crate) fn execute_syscall(&mut self, pc: u64) -> SimResult<SyscallOutcome> {
        let number = self.regs.read_gpr(REG_A7)?;
        let a0 = self.regs.read_gpr(REG_A0)?;
        debug!(number, a0, pc, "syscall");

        match number {
            SYSCALL_PRINT_INT => {
                let value = self.signed(a0);
                self.emit_output(&value.to_string());
            }
            SYSCALL_PRINT_FLOAT => {
                let value = f32::from_bits(unbox_f32(self.regs.read_fpr(REG_FA0)?));
                self.emit_output(&value.to_string());
            }
            SYSCALL_PRINT_DOUBLE => {
                let value = f64::from_bits(self.regs.read_fpr(REG_FA0)?);
                self.emit_output(&value.to_string());
            }
            SYSCALL_PRINT_STRING => {
                let text = self.read_c_string(a0)?;
                self.emit_output(&text);
            }
            SYSCALL_EXIT => {
                let code = self.signed(a0);
                self.commit_exit(code);
                return Ok(SyscallOutcome::Exit(code));
            }
            SYSCALL_READ => return self.sys_read(a0),
            SYSCALL_WRITE => self.sys_write(a0)?,
            _ => return Err(SimError::UnknownSyscall { pc, number }),
        }
        Ok(SyscallOutcome::Continue)
    }

    /// Interprets a register value as a signed XLEN integer.
    const fn signed(&self, value: u64) -> i64 {
        if self.regs.mode().is_rv32() {
            value as i32 as i64
        } else {
            value as i64
        }
    }

    fn read_c_string(&self, address: u64) -> SimResult<String> {
        let mut bytes = Vec::new();
        for offset in 0..MAX_PRINT_STRING_LEN {
            let byte = self.memory.read_byte(self.mode().truncate(address.wrapping_add(offset)))?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn sys_read(&mut self, fd: u64) -> SimResult<SyscallOutcome> {
        if fd != FD_STDIN {
            self.commit_gpr(REG_A0, u64::MAX)?;
            return Ok(SyscallOutcome::Continue);
        }
        let buffer = self.regs.read_gpr(REG_A1)?;
        let len = self.regs.read_gpr(REG_A2)?;
        // Validate the whole buffer first so a fatal access cannot consume queued input.
        self.memory.check_range(buffer, len)?;
        let max = usize::try_from(len).unwrap_or(usize::MAX);
        let Some(input) = self.control().read_input(max) else {
            debug!("read syscall interrupted by stop request");
            return Ok(SyscallOutcome::Interrupted);
        };
        if !input.is_empty() {
            self.commit_memory(buffer, &input)?;
        }
        self.commit_gpr(REG_A0, input.len() as u64)?;
        Ok(SyscallOutcome::Continue)
    }

    fn sys_write(&mut self, fd: u64) -> SimResult<()> {
        if fd != FD_STDOUT && fd != FD_STDERR {
            return self.commit_gpr(REG_A0, u64::MAX);
        }
        let buffer = self.regs.read_gpr(REG_A1)?;
        let len = usize::try_from(self.regs.read_gpr(REG_A2)?).unwrap_or(usize::MAX);
        let bytes = self.memory.read_bytes(buffer, len)?;
        self.emit_output(&String::from_utf8_lossy(&bytes));
        self.commit_gpr(REG_A0, len as u64)
    }
}
