//! Execution observers.
//!
//! The executors report every committed change through [`ExecutionObserver`] instead
//! of coupling to a UI. Two implementations ship with the crate:
//! 1. **[`NullObserver`]:** Discards everything (the default).
//! 2. **[`ChannelObserver`]:** Forwards [`VmEvent`]s over an `mpsc` channel to another
//!    thread, for front ends that render state asynchronously.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::Serialize;

use crate::common::error::SimError;
use crate::common::reg::RegisterClass;

/// Callbacks invoked by the executors after each committed change.
///
/// All methods default to doing nothing.
pub trait ExecutionObserver: Send {
    /// A register was written (also called when undo/redo restores a value).
    fn on_register_update(&mut self, _class: RegisterClass, _index: usize, _value: u64) {}

    /// `bytes` were written at `address`.
    fn on_memory_update(&mut self, _address: u64, _bytes: &[u8]) {}

    /// A syscall produced console output.
    fn on_output(&mut self, _text: &str) {}

    /// The program executed the exit syscall.
    fn on_exit(&mut self, _code: i64) {}

    /// A recoverable error skipped an instruction.
    fn on_warning(&mut self, _error: &SimError) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl ExecutionObserver for NullObserver {}

/// Event forwarded by [`ChannelObserver`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum VmEvent {
    /// A register was written.
    RegisterUpdate {
        /// Register file.
        class: RegisterClass,
        /// Register index or CSR address.
        index: usize,
        /// New value.
        value: u64,
    },
    /// Memory was written.
    MemoryUpdate {
        /// First byte written.
        address: u64,
        /// New contents.
        bytes: Vec<u8>,
    },
    /// Console output.
    Output(String),
    /// Program exit.
    Exit(i64),
    /// Recoverable error message.
    Warning(String),
}

/// Observer that sends a [`VmEvent`] per callback.
///
/// Send failures (receiver dropped) are ignored.
#[derive(Clone, Debug)]
pub struct ChannelObserver {
    tx: Sender<VmEvent>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel.
    pub fn channel() -> (Self, Receiver<VmEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: VmEvent) {
        let _ = self.tx.send(event);
    }
}

impl ExecutionObserver for ChannelObserver {
    fn on_register_update(&mut self, class: RegisterClass, index: usize, value: u64) {
        self.send(VmEvent::RegisterUpdate {
            class,
            index,
            value,
        });
    }

    fn on_memory_update(&mut self, address: u64, bytes: &[u8]) {
        self.send(VmEvent::MemoryUpdate {
            address,
            bytes: bytes.to_vec(),
        });
    }

    fn on_output(&mut self, text: &str) {
        self.send(VmEvent::Output(text.to_owned()));
    }

    fn on_exit(&mut self, code: i64) {
        self.send(VmEvent::Exit(code));
    }

    fn on_warning(&mut self, error: &SimError) {
        self.send(VmEvent::Warning(error.to_string()));
    }
}
