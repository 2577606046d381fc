//! Five-stage pipelined executor.
//!
//! Each step is one clock cycle. The stages are evaluated in program order
//! (IF, ID, EX, MEM, WB) against the pipeline registers as they were at the start of
//! the cycle, and the registers built during the cycle are swapped in at the end.
//! It provides:
//! 1. **Hazard handling:** Load-use stalls (or full RAW stalls without forwarding),
//!    `ecall` serialization, and a two-slot flush on taken branches and jumps.
//! 2. **Atomic cycles:** A fatal error restores the state of the previous cycle.
//! 3. **Run loop:** Drains the pipeline before reporting a breakpoint or program end.
//!
//! Floating-point and CSR instructions are not modeled; they continue as no-ops and
//! are reported when they retire. Undo is not supported.

use tracing::{debug, info, trace};

use crate::common::error::SimResult;
use crate::config::{Config, ExecutorKind};
use crate::core::Cpu;
use crate::core::pipeline::hazards::HazardDetectionUnit;
use crate::core::pipeline::latches::PipelineRegisters;
use crate::core::pipeline::stages::{
    CycleControl, decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::sim::executor::{Executor, HaltReason};

/// What one clock cycle did.
#[derive(Clone, Copy, Debug, Default)]
struct CycleOutcome {
    fetched: Option<u64>,
    interrupted: bool,
}

/// Executor modeling the classic five-stage in-order pipeline.
#[derive(Debug)]
pub struct PipelinedExecutor {
    cpu: Cpu,
    latches: PipelineRegisters,
    redirect: Option<u64>,
    fetch_halted: bool,
}

impl PipelinedExecutor {
    /// Creates an executor with a fresh CPU and empty pipeline.
    pub fn new(config: Config) -> SimResult<Self> {
        Ok(Self {
            cpu: Cpu::new(config)?,
            latches: PipelineRegisters::default(),
            redirect: None,
            fetch_halted: false,
        })
    }

    /// Pipeline registers as of the end of the last cycle.
    pub const fn latches(&self) -> &PipelineRegisters {
        &self.latches
    }

    /// Address the next fetch will use.
    pub fn next_fetch_pc(&self) -> u64 {
        self.redirect.unwrap_or_else(|| self.cpu.regs.pc())
    }

    /// Halt condition once the pipeline has drained.
    fn halted(&self) -> Option<HaltReason> {
        if !self.latches.is_empty() || self.redirect.is_some() {
            return None;
        }
        if let Some(code) = self.cpu.exit_code() {
            return Some(HaltReason::Exit(code));
        }
        (self.fetch_halted || self.cpu.regs.pc() >= self.cpu.program_size())
            .then_some(HaltReason::ProgramEnd)
    }

    /// Advances the pipeline by one clock cycle.
    fn cycle(&mut self, fetch_enabled: bool) -> SimResult<CycleOutcome> {
        let cur = self.latches;
        let mut next = PipelineRegisters::default();
        let pipeline = &self.cpu.config().pipeline;
        let mut ctl = CycleControl {
            stall: HazardDetectionUnit::should_stall(
                &cur,
                pipeline.hazard_detection,
                pipeline.forwarding,
            ),
            fetch_enabled: fetch_enabled && !self.fetch_halted,
            forwarding: pipeline.forwarding,
            redirect: self.redirect,
            ..CycleControl::default()
        };

        let stats = self.cpu.stats.clone();
        self.cpu.begin_step();
        if let Err(error) = self.run_stages(&cur, &mut next, &mut ctl) {
            self.cpu.rollback_step();
            self.cpu.stats = stats;
            return Err(error);
        }
        if ctl.interrupted {
            self.cpu.rollback_step();
            self.cpu.stats = stats;
            self.cpu.control().clear_stop();
            return Ok(CycleOutcome {
                fetched: None,
                interrupted: true,
            });
        }
        self.cpu.discard_step();

        self.cpu.stats.cycles += 1;
        self.latches = next;
        self.redirect = ctl.new_redirect.or(ctl.redirect);
        if ctl.exited {
            self.fetch_halted = true;
            self.redirect = None;
        }
        trace!(
            cycle = self.cpu.stats.cycles,
            stall = ctl.stall,
            pc = self.cpu.regs.pc(),
            "cycle"
        );
        Ok(CycleOutcome {
            fetched: ctl.fetched,
            interrupted: false,
        })
    }

    fn run_stages(
        &mut self,
        cur: &PipelineRegisters,
        next: &mut PipelineRegisters,
        ctl: &mut CycleControl,
    ) -> SimResult<()> {
        fetch_stage(&mut self.cpu, cur, next, ctl)?;
        decode_stage(&mut self.cpu, cur, next, ctl)?;
        execute_stage(&mut self.cpu, cur, next, ctl)?;
        mem_stage(&mut self.cpu, cur, next)?;
        wb_stage(&mut self.cpu, cur)
    }
}

impl Executor for PipelinedExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::Pipelined
    }

    fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    fn step(&mut self) -> SimResult<Option<HaltReason>> {
        if let Some(halt) = self.halted() {
            return Ok(Some(halt));
        }
        if self.cycle(true)?.interrupted {
            return Ok(Some(HaltReason::StopRequested));
        }
        Ok(self.halted())
    }

    fn run(&mut self) -> SimResult<HaltReason> {
        let limit = self.cpu.config().general.instruction_execution_limit;
        let start_retired = self.cpu.stats.instructions_retired;
        // Resuming from a breakpoint: the instruction under it may be fetched once.
        let mut skip_breakpoint_at = self.latches.is_empty().then(|| self.next_fetch_pc());

        let halt = loop {
            let control = self.cpu.control();
            if control.is_stop_requested() {
                control.clear_stop();
                break HaltReason::StopRequested;
            }
            if let Some(halt) = self.halted() {
                break halt;
            }
            let retired = self.cpu.stats.instructions_retired - start_retired;
            if limit.is_some_and(|limit| retired >= limit) {
                break HaltReason::InstructionLimit;
            }

            let fetch_pc = self.next_fetch_pc();
            let at_breakpoint = fetch_pc < self.cpu.program_size()
                && self.cpu.breakpoints.contains(fetch_pc)
                && skip_breakpoint_at != Some(fetch_pc);
            if at_breakpoint && self.latches.is_empty() && self.redirect.is_none() {
                debug!(pc = fetch_pc, "breakpoint hit");
                return Ok(HaltReason::Breakpoint(fetch_pc));
            }

            let outcome = self.cycle(!at_breakpoint)?;
            if outcome.interrupted {
                break HaltReason::StopRequested;
            }
            if outcome.fetched.is_some() && outcome.fetched == skip_breakpoint_at {
                skip_breakpoint_at = None;
            }
        };
        info!(%halt, pc = self.cpu.regs.pc(), cycles = self.cpu.stats.cycles, "run halted");
        Ok(halt)
    }

    fn reset(&mut self) -> SimResult<()> {
        self.latches = PipelineRegisters::default();
        self.redirect = None;
        self.fetch_halted = false;
        self.cpu.reset()
    }

    fn is_pipeline_empty(&self) -> bool {
        self.latches.is_empty()
    }
}
