//! Floating-point rounding modes.
//!
//! RISC-V defines five rounding modes:
//!
//! | Value | Mode | Description                             |
//! |-------|------|-----------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even          |
//! | 0b001 | RTZ  | Round towards Zero                      |
//! | 0b010 | RDN  | Round Down (towards −∞)                 |
//! | 0b011 | RUP  | Round Up (towards +∞)                   |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//!
//! The instruction field value `0b111` selects the dynamic mode held in `frm`.

/// Instruction `rm` value selecting the dynamic rounding mode from `frm`.
pub const DYNAMIC: u8 = 0b111;

/// RISC-V rounding mode encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    #[default]
    Rne = 0b000,
    /// Round towards Zero.
    Rtz = 0b001,
    /// Round Down (towards −∞).
    Rdn = 0b010,
    /// Round Up (towards +∞).
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude.
    Rmm = 0b100,
}

impl RoundingMode {
    /// Decodes a 3-bit rounding mode field.
    ///
    /// Returns `None` for reserved encodings (0b101, 0b110) and the dynamic
    /// sentinel (0b111), which must be resolved through [`RoundingMode::resolve`].
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x7 {
            0b000 => Some(Self::Rne),
            0b001 => Some(Self::Rtz),
            0b010 => Some(Self::Rdn),
            0b011 => Some(Self::Rup),
            0b100 => Some(Self::Rmm),
            _ => None,
        }
    }

    /// Resolves an instruction `rm` field against the current `frm`.
    ///
    /// # Returns
    ///
    /// The effective mode, or `Err(bits)` with the offending encoding when the
    /// instruction or `frm` names a reserved mode.
    pub const fn resolve(instr_rm: u8, frm: u8) -> Result<Self, u8> {
        let bits = if instr_rm & 0x7 == DYNAMIC { frm & 0x7 } else { instr_rm & 0x7 };
        match Self::from_bits(bits) {
            Some(rm) => Ok(rm),
            None => Err(bits),
        }
    }

    /// Returns the equivalent soft-float rounding mode.
    pub const fn to_soft(self) -> simple_soft_float::RoundingMode {
        use simple_soft_float::RoundingMode as Soft;
        match self {
            Self::Rne => Soft::TiesToEven,
            Self::Rtz => Soft::TowardZero,
            Self::Rdn => Soft::TowardNegative,
            Self::Rup => Soft::TowardPositive,
            Self::Rmm => Soft::TiesToAway,
        }
    }
}
