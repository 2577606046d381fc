//! Program loader.
//!
//! This module defines the assembled-program artifact consumed by the simulator and
//! places it in guest memory. It performs:
//! 1. **Artifact parsing:** [`AssembledProgram`] deserializes from the assembler's JSON
//!    output (text words, typed data values, symbols, and line maps).
//! 2. **Layout:** Text goes to address 0, four bytes per word. Data goes to the
//!    configured data-section base, each value aligned to its natural size.
//! 3. **Validation:** Sections that overlap or leave the address space are rejected
//!    before anything is written.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::soc::memory::Memory;

/// One typed value of the data section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DataValue {
    /// `.byte`
    U8(u8),
    /// `.half`
    U16(u16),
    /// `.word`
    U32(u32),
    /// `.dword`
    U64(u64),
    /// `.float`
    F32(f32),
    /// `.double`
    F64(f64),
    /// `.string` / `.asciz`; written byte for byte (include the NUL if wanted).
    String(String),
}

impl DataValue {
    /// Natural alignment in bytes.
    pub const fn alignment(&self) -> u64 {
        match self {
            Self::U8(_) | Self::String(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) | Self::F32(_) => 4,
            Self::U64(_) | Self::F64(_) => 8,
        }
    }

    /// Little-endian encoding of the value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::U8(v) => vec![*v],
            Self::U16(v) => v.to_le_bytes().to_vec(),
            Self::U32(v) => v.to_le_bytes().to_vec(),
            Self::U64(v) => v.to_le_bytes().to_vec(),
            Self::F32(v) => v.to_le_bytes().to_vec(),
            Self::F64(v) => v.to_le_bytes().to_vec(),
            Self::String(s) => s.as_bytes().to_vec(),
        }
    }
}

/// Symbol table entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Resolved address.
    pub address: u64,
    /// Source line of the definition.
    pub line: usize,
    /// True for data labels, false for text labels.
    pub is_data: bool,
}

/// Output of the assembler.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssembledProgram {
    /// Machine-code words in program order.
    pub text_buffer: Vec<u32>,
    /// Data-section values in program order.
    pub data_buffer: Vec<DataValue>,
    /// Label name to symbol.
    pub symbol_table: BTreeMap<String, SymbolEntry>,
    /// Instruction index to source line.
    pub instruction_to_line: BTreeMap<usize, usize>,
    /// Source line to instruction index.
    pub line_to_instruction: BTreeMap<usize, usize>,
}

impl AssembledProgram {
    /// Builds a text-only program.
    pub fn from_words(words: impl Into<Vec<u32>>) -> Self {
        Self {
            text_buffer: words.into(),
            ..Self::default()
        }
    }

    /// Parses the JSON form of the artifact.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON artifact from disk.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Byte address one past the last instruction.
    pub fn program_size(&self) -> u64 {
        self.text_buffer.len() as u64 * INSTRUCTION_SIZE
    }

    /// Address of instruction `index`.
    pub const fn instruction_address(index: usize) -> u64 {
        index as u64 * INSTRUCTION_SIZE
    }

    /// Source line of the instruction at `address`, if known.
    pub fn line_of(&self, address: u64) -> Option<usize> {
        let index = usize::try_from(address / INSTRUCTION_SIZE).ok()?;
        self.instruction_to_line.get(&index).copied()
    }

    /// Placement of every data value as `(address, bytes)`, starting at `base`.
    pub fn data_layout(&self, base: u64) -> Vec<(u64, Vec<u8>)> {
        let mut cursor = base;
        self.data_buffer
            .iter()
            .map(|value| {
                cursor = cursor.next_multiple_of(value.alignment());
                let bytes = value.to_bytes();
                let at = cursor;
                cursor += bytes.len() as u64;
                (at, bytes)
            })
            .collect()
    }
}

/// Where a loaded program ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadSummary {
    /// End of the text section.
    pub program_size: u64,
    /// One past the last data byte (the base when there is no data).
    pub data_end: u64,
}

/// Checks that both sections of `program` fit the layout described by `config`.
pub fn validate(program: &AssembledProgram, config: &Config) -> SimResult<LoadSummary> {
    let data_start = config.memory.data_section_start;
    let program_size = program.program_size();
    if program_size > data_start {
        return Err(SimError::ProgramTooLarge {
            start: 0,
            len: program_size,
            limit: data_start,
        });
    }
    let data_end = program
        .data_layout(data_start)
        .last()
        .map_or(data_start, |(at, bytes)| at + bytes.len() as u64);
    if data_end > config.memory.memory_size {
        return Err(SimError::ProgramTooLarge {
            start: data_start,
            len: data_end - data_start,
            limit: config.memory.memory_size,
        });
    }
    Ok(LoadSummary {
        program_size,
        data_end,
    })
}

/// Writes both sections of `program` into `memory`.
///
/// Memory is expected to be freshly reset; the caller validates the layout first.
pub fn write_sections(
    program: &AssembledProgram,
    config: &Config,
    memory: &mut Memory,
) -> SimResult<()> {
    for (index, word) in program.text_buffer.iter().enumerate() {
        memory.write_word(AssembledProgram::instruction_address(index), *word)?;
    }
    for (address, bytes) in program.data_layout(config.memory.data_section_start) {
        memory.write_bytes(address, &bytes)?;
    }
    Ok(())
}
