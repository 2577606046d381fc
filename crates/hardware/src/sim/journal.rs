//! Step journal for reversible execution.
//!
//! Every retired instruction produces exactly one [`StepDelta`]: the PC transition
//! plus the old and new value of each register and memory range it changed. The
//! [`StepJournal`] keeps two stacks:
//! 1. **Undo stack:** Deltas of retired steps, most recent last. Pushing a new delta
//!    invalidates the redo stack.
//! 2. **Redo stack:** Deltas that were undone, most recently undone last.
//!
//! An optional history limit drops the oldest undo entries.

use std::collections::VecDeque;

use serde::Serialize;

use crate::common::reg::RegisterClass;
use crate::stats::InstructionClass;

/// Old and new value of one register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterChange {
    /// Register file.
    pub class: RegisterClass,
    /// Register index (CSR address for [`RegisterClass::Csr`]).
    pub index: usize,
    /// Value before the step.
    pub old: u64,
    /// Value after the step.
    pub new: u64,
}

/// Old and new contents of one memory range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryChange {
    /// First byte of the range.
    pub address: u64,
    /// Bytes before the step.
    pub old: Vec<u8>,
    /// Bytes after the step.
    pub new: Vec<u8>,
}

/// Minimal record of state change for one retired instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepDelta {
    /// PC before the step.
    pub old_pc: u64,
    /// PC after the step.
    pub new_pc: u64,
    /// Register writes in commit order.
    pub register_changes: Vec<RegisterChange>,
    /// Memory writes in commit order.
    pub memory_changes: Vec<MemoryChange>,
    /// Exit code, if the step executed the exit syscall.
    pub exit_code: Option<i64>,
    /// Category the retired instruction was counted under.
    pub class: Option<InstructionClass>,
}

impl StepDelta {
    /// Opens an empty delta for a step starting at `pc`.
    pub const fn new(pc: u64) -> Self {
        Self {
            old_pc: pc,
            new_pc: pc,
            register_changes: Vec::new(),
            memory_changes: Vec::new(),
            exit_code: None,
            class: None,
        }
    }

    /// True if the step changed nothing but the PC.
    pub fn is_pc_only(&self) -> bool {
        self.register_changes.is_empty() && self.memory_changes.is_empty() && self.exit_code.is_none()
    }
}

/// Undo/redo stacks of [`StepDelta`]s.
#[derive(Clone, Debug, Default)]
pub struct StepJournal {
    undo: VecDeque<StepDelta>,
    redo: Vec<StepDelta>,
    limit: Option<usize>,
}

impl StepJournal {
    /// Creates an empty journal, optionally bounded to `limit` undo entries.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Records a retired step and invalidates the redo stack.
    pub fn push(&mut self, delta: StepDelta) {
        self.redo.clear();
        self.undo.push_back(delta);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                let _ = self.undo.pop_front();
            }
        }
    }

    /// Removes the most recent step for undoing.
    pub fn pop_undo(&mut self) -> Option<StepDelta> {
        self.undo.pop_back()
    }

    /// Removes the most recently undone step for redoing.
    pub fn pop_redo(&mut self) -> Option<StepDelta> {
        self.redo.pop()
    }

    /// Moves an undone step onto the redo stack.
    pub fn push_redo(&mut self, delta: StepDelta) {
        self.redo.push(delta);
    }

    /// Moves a redone step back onto the undo stack without touching the redo stack.
    pub fn push_undo_from_redo(&mut self, delta: StepDelta) {
        self.undo.push_back(delta);
    }

    /// Number of undoable steps.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable steps.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Most recent undoable step.
    pub fn last(&self) -> Option<&StepDelta> {
        self.undo.back()
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
