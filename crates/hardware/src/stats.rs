//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for both executors. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived CPI/IPC.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, system, FP).
//! 3. **Hazards:** Load-use and RAW stall cycles and control flushes of the pipeline.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::isa::opcodes;

/// Retirement category of an instruction, derived from its opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionClass {
    /// Integer arithmetic, logic and upper-immediate instructions.
    Alu,
    /// Integer and FP loads.
    Load,
    /// Integer and FP stores.
    Store,
    /// Conditional branches and jumps.
    Branch,
    /// `ecall`, `ebreak`, CSR access and `fence`.
    System,
    /// FP arithmetic, conversion, compare and move.
    Float,
}

impl InstructionClass {
    /// Classifies a raw instruction word.
    pub const fn of(word: u32) -> Self {
        match word & 0x7F {
            opcodes::OP_LOAD | opcodes::OP_LOAD_FP => Self::Load,
            opcodes::OP_STORE | opcodes::OP_STORE_FP => Self::Store,
            opcodes::OP_BRANCH | opcodes::OP_JAL | opcodes::OP_JALR => Self::Branch,
            opcodes::OP_SYSTEM | opcodes::OP_MISC_MEM => Self::System,
            op if opcodes::is_floating(op) => Self::Float,
            _ => Self::Alu,
        }
    }
}

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// ALU instructions retired.
    pub inst_alu: u64,
    /// Load instructions retired.
    pub inst_load: u64,
    /// Store instructions retired.
    pub inst_store: u64,
    /// Branch and jump instructions retired.
    pub inst_branch: u64,
    /// System instructions retired.
    pub inst_system: u64,
    /// Floating-point instructions retired.
    pub inst_fp: u64,

    /// Stall cycles inserted by the hazard detection unit.
    pub stalls_data: u64,
    /// Instruction slots discarded by taken branches, jumps and exit.
    pub stalls_control: u64,
    /// Number of pipeline flush events.
    pub flushes: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"hazards"`.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "hazards"];

impl SimStats {
    /// Counts one retired instruction of class `class`.
    pub const fn record_retire(&mut self, class: InstructionClass) {
        self.instructions_retired += 1;
        *self.class_counter(class) += 1;
    }

    /// Reverses [`SimStats::record_retire`] (used by undo).
    pub const fn retract_retire(&mut self, class: InstructionClass) {
        self.instructions_retired = self.instructions_retired.saturating_sub(1);
        let counter = self.class_counter(class);
        *counter = counter.saturating_sub(1);
    }

    const fn class_counter(&mut self, class: InstructionClass) -> &mut u64 {
        match class {
            InstructionClass::Alu => &mut self.inst_alu,
            InstructionClass::Load => &mut self.inst_load,
            InstructionClass::Store => &mut self.inst_store,
            InstructionClass::Branch => &mut self.inst_branch,
            InstructionClass::System => &mut self.inst_system,
            InstructionClass::Float => &mut self.inst_fp,
        }
    }

    /// Cycles per retired instruction (0 before anything retires).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Retired instructions per cycle (0 before the first cycle).
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Renders only the requested sections. An empty slice renders all of them.
    ///
    /// # Arguments
    ///
    /// * `sections` - Names from [`STATS_SECTIONS`].
    pub fn report_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, total: f64| (n as f64 / total) * 100.0;
        let mut out = String::new();

        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "RISC-V SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
                ("op.fp", self.inst_fp),
            ] {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("hazards") {
            let _ = writeln!(out, "HAZARDS");
            let _ = writeln!(
                out,
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            let _ = writeln!(
                out,
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                pct(self.stalls_control, cyc)
            );
            let _ = writeln!(out, "  flushes                {}", self.flushes);
        }
        let _ = writeln!(out, "==========================================================");
        out
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report_sections(&[]))
    }
}

