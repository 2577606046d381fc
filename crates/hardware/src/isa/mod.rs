//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcodes, field extraction, immediate decoding and the data-driven
//! encoding table for the decoded RV32/RV64 IMFD subset.
//!
//! # Layout
//!
//! * `instruction`: Bit-field extraction on raw instruction words.
//! * `decode`: Immediate reassembly and sign extension for the I/S/B/U/J formats.
//! * `opcodes`: Major opcodes and the funct3 groups the executors branch on.
//! * `table`: One row per decodable instruction, mapping an encoding to its ALU op.
//! * `abi`: Register ABI names and the indices used by the syscall interface.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Immediate decoding for all RISC-V instruction formats.
pub mod decode;

/// Instruction field extraction utilities.
pub mod instruction;

/// Major opcode and funct3 constants.
pub mod opcodes;

/// Data-driven encoding table.
pub mod table;
