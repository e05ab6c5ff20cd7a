//! Serialized frame sender
//!
//! The transport's send path is the only resource both workers touch, so it
//! sits behind an exclusive lock. The lock is held only for the duration of
//! one datagram write and is released on every exit path (guard drop),
//! including transport failure.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::transport::Transport;

/// Lock-guarded send path shared by both workers
pub struct FrameSender {
    transport: Arc<dyn Transport>,
    tx_lock: Mutex<()>,
}

impl FrameSender {
    /// Wrap a transport's send path
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            tx_lock: Mutex::new(()),
        }
    }

    /// Write one whole frame to the transport
    ///
    /// Blocks on the lock without a timeout; it is only ever held briefly.
    /// Transport failure is reported to the caller, not swallowed.
    pub fn send(&self, frame: &[u8]) -> Result<()> {
        let _guard = self.tx_lock.lock();
        self.transport.send(frame)
    }
}
