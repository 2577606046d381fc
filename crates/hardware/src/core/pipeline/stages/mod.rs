//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. Every stage reads the pipeline registers as they were at the
//! start of the cycle and writes the registers for the next cycle:
//! 1. **Fetch:** Retrieves the instruction at the PC, or at a pending redirect target.
//! 2. **Decode:** Decodes control signals and reads operands, bypassing write-back.
//! 3. **Execute:** Performs ALU operations, resolves branches, and runs `ecall`.
//! 4. **Memory:** Handles data load and store operations.
//! 5. **Writeback:** Commits results to the register file and retires instructions.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;

/// Per-cycle signals exchanged between the stages and the executor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleControl {
    /// The hazard unit holds IF/ID and inserts a bubble into ID/EX.
    pub stall: bool,
    /// IF may fetch a new instruction this cycle.
    pub fetch_enabled: bool,
    /// Forward results from EX/MEM and MEM/WB to EX.
    pub forwarding: bool,
    /// Redirect requested by EX in the previous cycle, consumed by IF.
    pub redirect: Option<u64>,
    /// Redirect requested by EX this cycle.
    pub new_redirect: Option<u64>,
    /// Address fetched this cycle, if any.
    pub fetched: Option<u64>,
    /// EX executed the exit syscall this cycle.
    pub exited: bool,
    /// EX blocked in a read syscall and was cancelled by a stop request.
    pub interrupted: bool,
}
