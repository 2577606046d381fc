//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a VM session.
//! It provides:
//! 1. **Defaults:** Baseline memory layout, register presets, and pipeline options.
//! 2. **Structures:** Grouped config for general behavior, memory, and the pipeline.
//! 3. **Enums:** ISA width and executor selection.
//!
//! A `Config` is built once (from JSON or `Config::default()`) and passed by reference
//! to the register file, memory, and executors.

use serde::Deserialize;

pub use crate::core::arch::mode::IsaMode;
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Total addressable memory (4 GiB).
    pub const MEMORY_SIZE: u64 = 0x1_0000_0000;

    /// Size of one lazily allocated memory block in bytes.
    pub const BLOCK_SIZE: u64 = 1024;

    /// Base address of the data section.
    pub const DATA_SECTION_START: u64 = 0x1000_0000;

    /// Initial stack pointer (`x2`).
    pub const STACK_POINTER: u64 = 0x7FFF_FFF0;

    /// Initial global pointer (`x3`), placed inside the data section.
    pub const GLOBAL_POINTER: u64 = 0x1000_0800;

    /// Initial thread pointer (`x4`).
    pub const THREAD_POINTER: u64 = 0x0;

    /// Capacity of the syscall input queue.
    pub const INPUT_QUEUE_CAPACITY: usize = 64;
}

/// Which execution engine drives the program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutorKind {
    /// One instruction completes per step.
    #[default]
    SingleCycle,
    /// Five-stage pipeline; one clock cycle per step.
    Pipelined,
}

/// Top-level simulator configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ISA, executor, and run-loop settings.
    pub general: GeneralConfig,
    /// Address-space layout and register presets.
    pub memory: MemoryConfig,
    /// Pipelined executor options.
    pub pipeline: PipelineConfig,
}

/// General VM behavior.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Base integer ISA width.
    pub isa: IsaMode,
    /// Executor created by the simulator facade.
    pub executor: ExecutorKind,
    /// Stops `run` after this many retired instructions.
    pub instruction_execution_limit: Option<u64>,
    /// Maximum number of undo entries kept; `None` keeps all.
    pub undo_history_limit: Option<usize>,
    /// Capacity of the bounded input queue feeding read syscalls.
    #[serde(default = "default_input_queue_capacity")]
    pub input_queue_capacity: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            isa: IsaMode::default(),
            executor: ExecutorKind::default(),
            instruction_execution_limit: None,
            undo_history_limit: None,
            input_queue_capacity: defaults::INPUT_QUEUE_CAPACITY,
        }
    }
}

/// Memory layout and architectural register presets.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Size of the address space in bytes; accesses at or beyond it fail.
    #[serde(default = "default_memory_size")]
    pub memory_size: u64,
    /// Allocation granule in bytes (power of two).
    #[serde(default = "default_block_size")]
    pub block_size: u64,
    /// Base address for the data section.
    #[serde(default = "default_data_section_start")]
    pub data_section_start: u64,
    /// Value loaded into `sp` on reset.
    #[serde(default = "default_stack_pointer")]
    pub stack_pointer: u64,
    /// Value loaded into `gp` on reset.
    #[serde(default = "default_global_pointer")]
    pub global_pointer: u64,
    /// Value loaded into `tp` on reset.
    #[serde(default = "default_thread_pointer")]
    pub thread_pointer: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            memory_size: defaults::MEMORY_SIZE,
            block_size: defaults::BLOCK_SIZE,
            data_section_start: defaults::DATA_SECTION_START,
            stack_pointer: defaults::STACK_POINTER,
            global_pointer: defaults::GLOBAL_POINTER,
            thread_pointer: defaults::THREAD_POINTER,
        }
    }
}

/// Pipelined executor options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stall on hazards the datapath cannot resolve.
    pub hazard_detection: bool,
    /// Bypass EX/MEM and MEM/WB results to the EX stage.
    pub forwarding: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hazard_detection: true,
            forwarding: true,
        }
    }
}

const fn default_memory_size() -> u64 {
    defaults::MEMORY_SIZE
}

const fn default_block_size() -> u64 {
    defaults::BLOCK_SIZE
}

const fn default_data_section_start() -> u64 {
    defaults::DATA_SECTION_START
}

const fn default_stack_pointer() -> u64 {
    defaults::STACK_POINTER
}

const fn default_global_pointer() -> u64 {
    defaults::GLOBAL_POINTER
}

const fn default_thread_pointer() -> u64 {
    defaults::THREAD_POINTER
}

const fn default_input_queue_capacity() -> usize {
    defaults::INPUT_QUEUE_CAPACITY
}

impl Config {
    /// Parses a JSON configuration and validates it.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Arguments
    ///
    /// * `json` - Configuration document.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the layout is internally consistent.
    pub fn validate(&self) -> SimResult<()> {
        let mem = &self.memory;
        if mem.memory_size == 0 {
            return Err(SimError::InvalidConfig("memory_size must be non-zero".into()));
        }
        if mem.block_size == 0 || !mem.block_size.is_power_of_two() {
            return Err(SimError::InvalidConfig(format!(
                "block_size {} is not a power of two",
                mem.block_size
            )));
        }
        if mem.data_section_start >= mem.memory_size {
            return Err(SimError::InvalidConfig(format!(
                "data_section_start {:#x} lies outside memory",
                mem.data_section_start
            )));
        }
        if mem.stack_pointer > mem.memory_size {
            return Err(SimError::InvalidConfig(format!(
                "stack_pointer {:#x} lies outside memory",
                mem.stack_pointer
            )));
        }
        if self.general.isa.is_rv32() && mem.memory_size > 0x1_0000_0000 {
            return Err(SimError::InvalidConfig(
                "rv32 cannot address more than 4 GiB".into(),
            ));
        }
        if self.general.input_queue_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "input_queue_capacity must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
