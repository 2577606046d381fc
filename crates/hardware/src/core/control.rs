//! Control decoder.
//!
//! Decoding happens in two independent phases:
//! 1. **Control signals:** [`ControlDecoder::control_signals`] derives the stage enables
//!    from the 7-bit opcode alone.
//! 2. **ALU signal:** [`ControlDecoder::alu_signal`] resolves the concrete operation from
//!    the opcode and the funct fields through the [`table`](crate::isa::table).
//!
//! Neither phase fails. Unrecognized encodings produce empty control signals and
//! [`AluOp::Nop`], so garbage memory executes as a no-op.

use crate::core::arch::mode::IsaMode;
use crate::core::pipeline::signals::{AluOp, ControlSignals};
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{
    OP_AUIPC, OP_BRANCH, OP_FMADD, OP_FMSUB, OP_FNMADD, OP_FNMSUB, OP_FP, OP_IMM, OP_IMM_32,
    OP_JAL, OP_JALR, OP_LOAD, OP_LOAD_FP, OP_LUI, OP_REG, OP_REG_32, OP_STORE, OP_STORE_FP,
    OP_SYSTEM,
};
use crate::isa::table;

const R_TYPE: ControlSignals = ControlSignals {
    alu_src: false,
    mem_to_reg: false,
    reg_write: true,
    mem_read: false,
    mem_write: false,
    branch: false,
};

const I_TYPE: ControlSignals = ControlSignals {
    alu_src: true,
    ..R_TYPE
};

const LOAD: ControlSignals = ControlSignals {
    alu_src: true,
    mem_to_reg: true,
    reg_write: true,
    mem_read: true,
    mem_write: false,
    branch: false,
};

const STORE: ControlSignals = ControlSignals {
    alu_src: true,
    mem_to_reg: false,
    reg_write: false,
    mem_read: false,
    mem_write: true,
    branch: false,
};

const BRANCH: ControlSignals = ControlSignals {
    alu_src: false,
    mem_to_reg: false,
    reg_write: false,
    mem_read: false,
    mem_write: false,
    branch: true,
};

const JAL: ControlSignals = ControlSignals {
    reg_write: true,
    ..BRANCH
};

const JALR: ControlSignals = ControlSignals {
    alu_src: true,
    ..JAL
};

/// Stateless instruction decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlDecoder;

impl ControlDecoder {
    /// Derives the stage enables of `word` from its opcode.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvss_core::core::control::ControlDecoder;
    ///
    /// // lw x5, 8(x2)
    /// let ctrl = ControlDecoder::control_signals(0x0081_2283);
    /// assert!(ctrl.mem_read && ctrl.mem_to_reg && ctrl.reg_write && ctrl.alu_src);
    /// assert!(!ctrl.mem_write && !ctrl.branch);
    /// ```
    pub const fn control_signals(word: u32) -> ControlSignals {
        match word & 0x7F {
            OP_REG | OP_REG_32 | OP_FP | OP_FMADD | OP_FMSUB | OP_FNMSUB | OP_FNMADD
            | OP_SYSTEM => R_TYPE,
            OP_IMM | OP_IMM_32 | OP_LUI | OP_AUIPC => I_TYPE,
            OP_LOAD | OP_LOAD_FP => LOAD,
            OP_STORE | OP_STORE_FP => STORE,
            OP_BRANCH => BRANCH,
            OP_JAL => JAL,
            OP_JALR => JALR,
            _ => ControlSignals {
                alu_src: false,
                mem_to_reg: false,
                reg_write: false,
                mem_read: false,
                mem_write: false,
                branch: false,
            },
        }
    }

    /// Resolves the ALU operation of `word`; unknown encodings yield [`AluOp::Nop`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rvss_core::core::control::ControlDecoder;
    /// use rvss_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(ControlDecoder::alu_signal(0x0020_81B3), AluOp::Add); // add x3, x1, x2
    /// assert_eq!(ControlDecoder::alu_signal(0xFFFF_FFFF), AluOp::Nop);
    /// ```
    pub fn alu_signal(word: u32) -> AluOp {
        table::lookup(word).map_or(AluOp::Nop, |e| e.op)
    }

    /// True if `word` is a known encoding that exists in `mode`.
    pub fn is_supported(word: u32, mode: IsaMode) -> bool {
        table::lookup(word).is_some_and(|e| !(e.rv64_only && mode.is_rv32()))
    }

    /// True if `word` decodes but needs RV64 while `mode` is RV32.
    pub fn requires_rv64(word: u32, mode: IsaMode) -> bool {
        mode.is_rv32() && table::lookup(word).is_some_and(|e| e.rv64_only)
    }

    /// Registers `word` reads from the integer file, as `(rs1, rs2)`; `None` for unused.
    ///
    /// Used by the hazard unit so that immediates and FP sources never cause stalls.
    pub fn int_sources(word: u32) -> (Option<usize>, Option<usize>) {
        let (rs1, rs2) = (word.rs1(), word.rs2());
        match word.opcode() {
            OP_REG | OP_REG_32 | OP_BRANCH | OP_STORE => (Some(rs1), Some(rs2)),
            OP_IMM | OP_IMM_32 | OP_LOAD | OP_JALR | OP_LOAD_FP | OP_STORE_FP => (Some(rs1), None),
            OP_SYSTEM if word.funct3() & 0b100 == 0 && word.funct3() != 0 => (Some(rs1), None),
            OP_FP => match Self::alu_signal(word) {
                AluOp::Float(op) | AluOp::Double(op) if op.reads_int_operand() => (Some(rs1), None),
                _ => (None, None),
            },
            _ => (None, None),
        }
    }
}
