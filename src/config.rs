//! Configuration for reglink
//!
//! Centralized configuration with sensible defaults.
//!
//! The defaults mirror the fixed policy constants of the protocol: a command
//! queue of 10 entries, a reply-ack queue of a single entry, one-second
//! enqueue timeouts, a 100 ms reply-ack wait, and three response attempts.

use std::time::Duration;

/// Main configuration for a reglink slave instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Channel Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the bounded command channel
    pub command_queue_capacity: usize,

    /// Capacity of the bounded reply-ack channel
    pub reply_ack_queue_capacity: usize,

    /// How long the dispatcher waits to place a record on a full channel
    /// before dropping it
    pub enqueue_timeout: Duration,

    // -------------------------------------------------------------------------
    // Handshake Configuration
    // -------------------------------------------------------------------------
    /// How long the processor waits for a reply-ack per attempt
    pub reply_ack_wait: Duration,

    /// Total response transmissions before the handshake is abandoned
    pub response_attempts: u32,

    // -------------------------------------------------------------------------
    // History Configuration
    // -------------------------------------------------------------------------
    /// Entries kept per history ring (commands and responses each)
    pub history_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_queue_capacity: 10,
            reply_ack_queue_capacity: 1,
            enqueue_timeout: Duration::from_millis(1000),
            reply_ack_wait: Duration::from_millis(100),
            response_attempts: 3,
            history_capacity: 10,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the command channel capacity
    pub fn command_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.command_queue_capacity = capacity;
        self
    }

    /// Set the reply-ack channel capacity
    pub fn reply_ack_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.reply_ack_queue_capacity = capacity;
        self
    }

    /// Set the bounded wait for enqueueing inbound records
    pub fn enqueue_timeout(mut self, timeout: Duration) -> Self {
        self.config.enqueue_timeout = timeout;
        self
    }

    /// Set the per-attempt reply-ack wait
    pub fn reply_ack_wait(mut self, wait: Duration) -> Self {
        self.config.reply_ack_wait = wait;
        self
    }

    /// Set the number of response transmission attempts
    pub fn response_attempts(mut self, attempts: u32) -> Self {
        self.config.response_attempts = attempts;
        self
    }

    /// Set the history ring capacity
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
