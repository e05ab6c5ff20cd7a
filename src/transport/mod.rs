//! Abstract datagram transport
//!
//! The [`Transport`] trait lets the protocol core run over any blocking
//! datagram transport. [`UdpTransport`] is the production implementation;
//! [`ChannelTransport`] is an in-memory pair for deterministic tests.
//!
//! The receive path is only ever touched by the input dispatcher, so
//! implementations need no internal receive locking. The send path is
//! serialized above this trait by [`FrameSender`](crate::link::FrameSender).

mod channel;
mod udp;

use crate::error::Result;

pub use channel::ChannelTransport;
pub use udp::UdpTransport;

/// Blocking datagram transport used by the protocol workers
///
/// Object-safe so it can be shared as `Arc<dyn Transport>`.
pub trait Transport: Send + Sync {
    /// Send one datagram containing the whole frame
    fn send(&self, frame: &[u8]) -> Result<()>;

    /// Receive one datagram into `buf`, returning its length
    ///
    /// Blocks indefinitely; there is nothing useful to do while idle.
    /// Return [`LinkError::Closed`](crate::LinkError::Closed) only when the
    /// link is permanently gone; any other error is treated as transient and
    /// the caller's receive loop keeps running.
    fn recv(&self, buf: &mut [u8]) -> Result<usize>;
}
