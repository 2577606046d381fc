//! Instruction pipeline implementation.
//!
//! This module contains the building blocks of the five-stage pipelined executor.
//! It includes the following components:
//! 1. **Hazards:** Load-use and read-after-write detection, `ecall` serialization, and
//!    operand forwarding.
//! 2. **Latches:** Double-buffered pipeline registers (IF/ID, ID/EX, EX/MEM, MEM/WB).
//! 3. **Signals:** Control signals and operations produced by decode; shared with the
//!    single-cycle datapath.
//! 4. **Stages:** Fetch, Decode, Execute, Memory, and Writeback.

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
