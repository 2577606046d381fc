//! Common utilities and types used throughout the simulator.
//!
//! This module provides building blocks shared by every component. It includes:
//! 1. **Constants:** Instruction width and syscall numbers.
//! 2. **Error Handling:** The crate-wide [`SimError`] taxonomy.
//! 3. **Register Management:** A unified, bounds-checked register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and the fatal/recoverable classification.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::{SimError, SimResult};
pub use reg::{RegisterClass, RegisterFile};
