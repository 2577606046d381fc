//! ISA width selection.
//!
//! This module defines the integer register width the simulator runs with. It provides:
//! 1. **Mode Classification:** RV32 and RV64 variants, deserializable from configuration.
//! 2. **Width Helpers:** Truncation of values to the active XLEN.
//! 3. **Observability:** Human-readable naming for error messages and logs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base integer ISA width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsaMode {
    /// 32-bit integer registers and addresses.
    Rv32,
    /// 64-bit integer registers and addresses.
    #[default]
    Rv64,
}

impl IsaMode {
    /// Returns true when running the 32-bit base ISA.
    pub const fn is_rv32(self) -> bool {
        matches!(self, Self::Rv32)
    }

    /// Truncates `value` to XLEN bits.
    ///
    /// In RV32 mode the upper 32 bits are cleared; in RV64 mode the value is unchanged.
    #[inline]
    pub const fn truncate(self, value: u64) -> u64 {
        match self {
            Self::Rv32 => value & 0xFFFF_FFFF,
            Self::Rv64 => value,
        }
    }

    /// Returns the lowercase ISA name (`"rv32"` or `"rv64"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rv32 => "rv32",
            Self::Rv64 => "rv64",
        }
    }
}

impl fmt::Display for IsaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
