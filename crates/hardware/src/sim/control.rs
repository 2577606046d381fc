//! Cross-thread run control.
//!
//! A [`SimControl`] is shared (behind an `Arc`) between the thread running the
//! simulator and any other thread, such as a UI. It carries:
//! 1. **Stop flag:** [`SimControl::request_stop`] is checked once per retired
//!    instruction by the run loops and also wakes a blocked read syscall.
//! 2. **Input queue:** A bounded FIFO feeding the read syscall. A read with an empty
//!    queue blocks until a producer pushes input or a stop is requested.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Condvar, Mutex};

use crate::common::error::{SimError, SimResult};

/// Shared stop flag and input queue.
#[derive(Debug)]
pub struct SimControl {
    stop: AtomicBool,
    queue: Mutex<VecDeque<Vec<u8>>>,
    ready: Condvar,
    capacity: usize,
}

impl SimControl {
    /// Creates a control block whose input queue holds at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            stop: AtomicBool::new(false),
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            ready: Condvar::new(),
            capacity,
        }
    }

    /// Asks the running loop to stop after the current instruction.
    ///
    /// Also wakes any read syscall blocked on the input queue.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        let _guard = self.queue.lock();
        let _ = self.ready.notify_all();
    }

    /// Clears a previous stop request; called when a new run starts.
    pub fn clear_stop(&self) {
        self.stop.store(false, Ordering::SeqCst);
    }

    /// True if a stop has been requested and not yet cleared.
    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Capacity of the input queue.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of queued input entries.
    pub fn pending_input(&self) -> usize {
        self.queue.lock().len()
    }

    /// Queues one input entry for the read syscall.
    ///
    /// # Errors
    ///
    /// [`SimError::InputQueueFull`] when the queue is at capacity.
    pub fn push_input(&self, input: impl Into<Vec<u8>>) -> SimResult<()> {
        let mut queue = self.queue.lock();
        if queue.len() >= self.capacity {
            return Err(SimError::InputQueueFull {
                capacity: self.capacity,
            });
        }
        queue.push_back(input.into());
        let _ = self.ready.notify_one();
        Ok(())
    }

    /// Takes up to `max` bytes of input, blocking while the queue is empty.
    ///
    /// Bytes beyond `max` stay at the front of the queue for the next read.
    /// Returns `None` if a stop is requested while waiting.
    pub fn read_input(&self, max: usize) -> Option<Vec<u8>> {
        let mut queue = self.queue.lock();
        loop {
            if self.is_stop_requested() {
                return None;
            }
            if let Some(mut entry) = queue.pop_front() {
                if entry.len() > max {
                    let rest = entry.split_off(max);
                    queue.push_front(rest);
                }
                return Some(entry);
            }
            self.ready.wait(&mut queue);
        }
    }

    /// Drops all queued input.
    pub fn clear_input(&self) {
        self.queue.lock().clear();
    }
}
