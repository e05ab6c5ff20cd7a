//! Command/response history
//!
//! Fixed-capacity audit log of the most recent commands and responses.
//! Appends are best-effort and never fail; overflow silently evicts the
//! oldest entry. A response appears once per transmission attempt.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::protocol::{CommandRecord, ResponseRecord};

/// Ring-buffered history of the last N commands and last N responses
pub struct HistoryLog {
    capacity: usize,
    commands: Mutex<VecDeque<CommandRecord>>,
    responses: Mutex<VecDeque<ResponseRecord>>,
}

impl HistoryLog {
    /// Create a history log keeping `capacity` entries per ring
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            commands: Mutex::new(VecDeque::with_capacity(capacity)),
            responses: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Record an accepted command
    pub fn record_command(&self, record: CommandRecord) {
        let mut commands = self.commands.lock();
        if commands.len() == self.capacity {
            commands.pop_front();
        }
        commands.push_back(record);
    }

    /// Record a response transmission
    pub fn record_response(&self, record: ResponseRecord) {
        let mut responses = self.responses.lock();
        if responses.len() == self.capacity {
            responses.pop_front();
        }
        responses.push_back(record);
    }

    /// Snapshot of the retained commands, oldest first
    pub fn commands(&self) -> Vec<CommandRecord> {
        self.commands.lock().iter().copied().collect()
    }

    /// Snapshot of the retained responses, oldest first
    pub fn responses(&self) -> Vec<ResponseRecord> {
        self.responses.lock().iter().copied().collect()
    }

    /// Entries kept per ring
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
