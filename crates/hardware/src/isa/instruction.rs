//! Instruction field extraction.
//!
//! Every field of a 32-bit RISC-V instruction word is derived on demand by masking
//! and shifting. No decoded form is stored by the single-cycle executor; the
//! pipelined executor copies the fields it needs into its pipeline registers.

/// Bit mask for the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for any 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for the CSR address field (bits 20-31).
pub const CSR_MASK: u32 = 0xFFF;

/// Extraction of the standard RISC-V instruction fields.
pub trait InstructionBits {
    /// Opcode (bits 0-6).
    fn opcode(&self) -> u32;

    /// Destination register (bits 7-11).
    fn rd(&self) -> usize;

    /// First source register (bits 15-19).
    fn rs1(&self) -> usize;

    /// Second source register (bits 20-24).
    fn rs2(&self) -> usize;

    /// Third source register of the fused multiply-add family (bits 27-31).
    fn rs3(&self) -> usize;

    /// funct3 (bits 12-14). Doubles as the rounding-mode field of FP instructions.
    fn funct3(&self) -> u32;

    /// funct7 (bits 25-31).
    fn funct7(&self) -> u32;

    /// funct6 (bits 26-31), which selects the RV64 immediate shifts.
    fn funct6(&self) -> u32;

    /// funct2 (bits 25-26), the precision selector of the fused family.
    fn funct2(&self) -> u32;

    /// CSR address (bits 20-31).
    fn csr(&self) -> u32;

    /// Rounding-mode field of FP instructions; an alias of [`InstructionBits::funct3`].
    fn rm(&self) -> u8 {
        self.funct3() as u8
    }
}

impl InstructionBits for u32 {
    #[inline]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline]
    fn rs3(&self) -> usize {
        ((self >> 27) & REG_MASK) as usize
    }

    #[inline]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline]
    fn funct6(&self) -> u32 {
        (self >> 26) & 0x3F
    }

    #[inline]
    fn funct2(&self) -> u32 {
        (self >> 25) & 0x3
    }

    #[inline]
    fn csr(&self) -> u32 {
        (self >> 20) & CSR_MASK
    }
}
