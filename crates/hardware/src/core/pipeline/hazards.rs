//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Identifies load-use hazards (and, with forwarding disabled,
//!    every read-after-write dependency) that require a stall.
//! 2. **Operand Forwarding:** Resolves read-after-write hazards by bypassing the register
//!    file, with the youngest producer taking priority.
//! 3. **Serialization:** `ecall` waits in decode until older instructions have retired.

use crate::core::control::ControlDecoder;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb, PipelineRegisters};
use crate::isa::opcodes::system;

/// Where an operand value was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// Value read at decode.
    RegisterFile,
    /// Result of the instruction currently in MEM.
    ExMem,
    /// Result of the instruction currently in WB.
    MemWb,
}

/// Stall decisions for the instruction in decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct HazardDetectionUnit;

impl HazardDetectionUnit {
    /// Checks if a pipeline stall is needed due to a load-use data hazard.
    ///
    /// A load-use hazard occurs when the instruction in EX is a load whose destination
    /// is read by the instruction in ID. The loaded value only exists after MEM, so
    /// forwarding cannot help.
    ///
    /// # Arguments
    ///
    /// * `id_ex` - The ID/EX latch (instruction currently executing).
    /// * `if_id` - The IF/ID latch (instruction being decoded).
    ///
    /// # Examples
    ///
    /// ```
    /// use rvss_core::core::control::ControlDecoder;
    /// use rvss_core::core::pipeline::hazards::HazardDetectionUnit;
    /// use rvss_core::core::pipeline::latches::{IdEx, IfId};
    ///
    /// // lw x1, 0(x2) in EX, add x3, x1, x4 in ID
    /// let id_ex = IdEx {
    ///     valid: true,
    ///     rd: 1,
    ///     ctrl: ControlDecoder::control_signals(0x0001_2083),
    ///     ..IdEx::default()
    /// };
    /// let if_id = IfId { valid: true, pc: 4, word: 0x0040_81B3 };
    /// assert!(HazardDetectionUnit::detect_load_use_hazard(&id_ex, &if_id));
    /// ```
    pub fn detect_load_use_hazard(id_ex: &IdEx, if_id: &IfId) -> bool {
        id_ex.valid
            && id_ex.ctrl.mem_read
            && id_ex.rd != 0
            && if_id.valid
            && reads_register(if_id.word, id_ex.rd)
    }

    /// Checks for any read-after-write dependency of the instruction in ID on the
    /// instructions in EX or MEM. Used when forwarding is disabled.
    pub fn detect_data_hazard(if_id: &IfId, id_ex: &IdEx, ex_mem: &ExMem) -> bool {
        if !if_id.valid {
            return false;
        }
        let ex_conflict = id_ex.valid
            && id_ex.ctrl.reg_write
            && id_ex.rd != 0
            && reads_register(if_id.word, id_ex.rd);
        let mem_conflict = ex_mem.valid
            && ex_mem.ctrl.reg_write
            && ex_mem.rd != 0
            && reads_register(if_id.word, ex_mem.rd);
        ex_conflict || mem_conflict
    }

    /// True while an `ecall` in ID must wait for older instructions to retire.
    pub fn detect_serialization(latches: &PipelineRegisters) -> bool {
        latches.if_id.valid
            && latches.if_id.word == system::ECALL
            && !latches.is_drained_behind_decode()
    }

    /// Combined stall decision for one cycle.
    ///
    /// # Arguments
    ///
    /// * `latches` - Pipeline registers at the start of the cycle.
    /// * `hazard_detection` - Whether data hazards are checked at all.
    /// * `forwarding` - Whether the datapath forwards results to EX.
    pub fn should_stall(
        latches: &PipelineRegisters,
        hazard_detection: bool,
        forwarding: bool,
    ) -> bool {
        if Self::detect_serialization(latches) {
            return true;
        }
        if !hazard_detection {
            return false;
        }
        if forwarding {
            Self::detect_load_use_hazard(&latches.id_ex, &latches.if_id)
        } else {
            Self::detect_data_hazard(&latches.if_id, &latches.id_ex, &latches.ex_mem)
        }
    }
}

/// True if `word` reads integer register `reg` as a source.
fn reads_register(word: u32, reg: usize) -> bool {
    let (rs1, rs2) = ControlDecoder::int_sources(word);
    rs1 == Some(reg) || rs2 == Some(reg)
}

/// Operand bypass network feeding the EX stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardingUnit;

impl ForwardingUnit {
    /// Resolves one source operand.
    ///
    /// EX/MEM takes priority over MEM/WB, since it holds the more recent producer.
    /// Producers writing `x0` never forward.
    ///
    /// # Arguments
    ///
    /// * `source` - Source register of the consumer, `None` if it reads none.
    /// * `decoded` - Value read from the register file at decode.
    /// * `ex_mem` - EX/MEM latch at the start of the cycle.
    /// * `mem_wb` - MEM/WB latch at the start of the cycle.
    ///
    /// # Returns
    ///
    /// The operand value and where it came from.
    pub fn forward(
        source: Option<usize>,
        decoded: u64,
        ex_mem: &ExMem,
        mem_wb: &MemWb,
    ) -> (u64, ForwardSource) {
        let Some(reg) = source.filter(|&r| r != 0) else {
            return (decoded, ForwardSource::RegisterFile);
        };
        match (ex_mem.forward_value(), mem_wb.forward_value()) {
            (Some(value), _) if ex_mem.rd == reg => (value, ForwardSource::ExMem),
            (_, Some(value)) if mem_wb.rd == reg => (value, ForwardSource::MemWb),
            _ => (decoded, ForwardSource::RegisterFile),
        }
    }
}
