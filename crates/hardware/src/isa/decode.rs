//! Immediate decoding.
//!
//! This module reassembles and sign-extends the immediate of every base format
//! (I, S, B, U, J). Branch and jump offsets come out already scaled (bit 0 clear).

use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes;

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Sign-extends the low `bits` bits of `val` to 64 bits.
///
/// # Arguments
///
/// * `val` - The value to extend.
/// * `bits` - The number of valid bits in `val` (1 to 32).
pub const fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val << shift) as i32 >> shift) as i64
}

/// I-type immediate: `inst[31:20]`.
pub const fn imm_i(inst: u32) -> i64 {
    ((inst as i32) >> 20) as i64
}

/// S-type immediate: `inst[31:25] | inst[11:7]`.
pub const fn imm_s(inst: u32) -> i64 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// B-type immediate: a 13-bit even offset.
pub const fn imm_b(inst: u32) -> i64 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = inst >> 31;
    sign_extend(
        (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1),
        13,
    )
}

/// U-type immediate: `inst[31:12] << 12`, sign-extended from bit 31.
pub const fn imm_u(inst: u32) -> i64 {
    ((inst & 0xFFFF_F000) as i32) as i64
}

/// J-type immediate: a 21-bit even offset.
pub const fn imm_j(inst: u32) -> i64 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = inst >> 31;
    sign_extend(
        (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1),
        21,
    )
}

/// Returns the immediate of `inst` according to its opcode's format.
///
/// Opcodes without an immediate (R-type, FP arithmetic, `ecall`) yield 0. CSR
/// instructions use the I-type field, whose low 12 bits are the CSR address.
pub fn immediate(inst: u32) -> i64 {
    match inst.opcode() {
        opcodes::OP_IMM
        | opcodes::OP_IMM_32
        | opcodes::OP_LOAD
        | opcodes::OP_LOAD_FP
        | opcodes::OP_JALR
        | opcodes::OP_SYSTEM => imm_i(inst),
        opcodes::OP_STORE | opcodes::OP_STORE_FP => imm_s(inst),
        opcodes::OP_BRANCH => imm_b(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => imm_u(inst),
        opcodes::OP_JAL => imm_j(inst),
        _ => 0,
    }
}
