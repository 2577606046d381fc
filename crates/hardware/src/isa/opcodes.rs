//! Major opcodes (bits 0-6) of the decoded RV32/RV64 IMFD subset.

/// Integer loads (`lb`, `lh`, `lw`, `ld`, `lbu`, `lhu`, `lwu`).
pub const OP_LOAD: u32 = 0b000_0011;
/// Floating-point loads (`flw`, `fld`).
pub const OP_LOAD_FP: u32 = 0b000_0111;
/// Memory ordering (`fence`); executes as a no-op.
pub const OP_MISC_MEM: u32 = 0b000_1111;
/// Register-immediate arithmetic.
pub const OP_IMM: u32 = 0b001_0011;
/// Add upper immediate to PC.
pub const OP_AUIPC: u32 = 0b001_0111;
/// Register-immediate word arithmetic (RV64).
pub const OP_IMM_32: u32 = 0b001_1011;
/// Integer stores.
pub const OP_STORE: u32 = 0b010_0011;
/// Floating-point stores (`fsw`, `fsd`).
pub const OP_STORE_FP: u32 = 0b010_0111;
/// Register-register arithmetic, including the M extension.
pub const OP_REG: u32 = 0b011_0011;
/// Load upper immediate.
pub const OP_LUI: u32 = 0b011_0111;
/// Register-register word arithmetic (RV64).
pub const OP_REG_32: u32 = 0b011_1011;
/// `fmadd.*`
pub const OP_FMADD: u32 = 0b100_0011;
/// `fmsub.*`
pub const OP_FMSUB: u32 = 0b100_0111;
/// `fnmsub.*`
pub const OP_FNMSUB: u32 = 0b100_1011;
/// `fnmadd.*`
pub const OP_FNMADD: u32 = 0b100_1111;
/// Floating-point arithmetic, compare, convert and move.
pub const OP_FP: u32 = 0b101_0011;
/// Conditional branches.
pub const OP_BRANCH: u32 = 0b110_0011;
/// Jump and link register.
pub const OP_JALR: u32 = 0b110_0111;
/// Jump and link.
pub const OP_JAL: u32 = 0b110_1111;
/// `ecall`, `ebreak` and the Zicsr instructions.
pub const OP_SYSTEM: u32 = 0b111_0011;

/// True for the four fused multiply-add opcodes.
pub const fn is_fused(opcode: u32) -> bool {
    matches!(opcode, OP_FMADD | OP_FMSUB | OP_FNMSUB | OP_FNMADD)
}

/// True for opcodes whose instructions read or write the FP register file.
pub const fn is_floating(opcode: u32) -> bool {
    matches!(opcode, OP_LOAD_FP | OP_STORE_FP | OP_FP) || is_fused(opcode)
}

/// funct3 values of the `OP_SYSTEM` opcode.
pub mod system {
    /// `ecall` / `ebreak` (distinguished by the immediate).
    pub const PRIV: u32 = 0b000;
    /// `csrrw`
    pub const CSRRW: u32 = 0b001;
    /// `csrrs`
    pub const CSRRS: u32 = 0b010;
    /// `csrrc`
    pub const CSRRC: u32 = 0b011;
    /// `csrrwi`
    pub const CSRRWI: u32 = 0b101;
    /// `csrrsi`
    pub const CSRRSI: u32 = 0b110;
    /// `csrrci`
    pub const CSRRCI: u32 = 0b111;
    /// Raw encoding of `ecall`.
    pub const ECALL: u32 = 0x0000_0073;
    /// Raw encoding of `ebreak`.
    pub const EBREAK: u32 = 0x0010_0073;
}

/// funct3 values of the load and store opcodes (access width and signedness).
pub mod width {
    /// Byte, sign-extended.
    pub const B: u32 = 0b000;
    /// Half-word, sign-extended.
    pub const H: u32 = 0b001;
    /// Word, sign-extended (also `flw`/`fsw`).
    pub const W: u32 = 0b010;
    /// Double-word (also `fld`/`fsd`).
    pub const D: u32 = 0b011;
    /// Byte, zero-extended.
    pub const BU: u32 = 0b100;
    /// Half-word, zero-extended.
    pub const HU: u32 = 0b101;
    /// Word, zero-extended (RV64).
    pub const WU: u32 = 0b110;
}

/// funct3 values of the branch opcode.
pub mod branch {
    /// `beq`
    pub const BEQ: u32 = 0b000;
    /// `bne`
    pub const BNE: u32 = 0b001;
    /// `blt`
    pub const BLT: u32 = 0b100;
    /// `bge`
    pub const BGE: u32 = 0b101;
    /// `bltu`
    pub const BLTU: u32 = 0b110;
    /// `bgeu`
    pub const BGEU: u32 = 0b111;
}
