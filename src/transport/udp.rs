//! UDP transport
//!
//! Production [`Transport`] backed by a connected `std::net::UdpSocket`.

use std::net::{ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::error::{LinkError, Result};

use super::Transport;

/// Bound on a single datagram send. The receive path deliberately has no
/// timeout: the dispatcher blocks until something arrives.
const SEND_TIMEOUT: Duration = Duration::from_millis(1000);

/// Datagram transport over a connected UDP socket
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind to `local` and connect to the master at `peer`
    ///
    /// Connecting fixes the remote address so `send`/`recv` need no
    /// per-datagram addressing and stray datagrams from other peers are
    /// filtered by the OS.
    pub fn bind(local: impl ToSocketAddrs, peer: impl ToSocketAddrs) -> Result<Self> {
        let socket = UdpSocket::bind(local)?;
        socket.connect(peer)?;
        socket.set_write_timeout(Some(SEND_TIMEOUT))?;
        Ok(Self { socket })
    }

    /// Wrap an already-connected socket
    pub fn new(socket: UdpSocket) -> Self {
        Self { socket }
    }
}

impl Transport for UdpTransport {
    fn send(&self, frame: &[u8]) -> Result<()> {
        let sent = self.socket.send(frame)?;
        if sent != frame.len() {
            return Err(LinkError::Transport(format!(
                "Short datagram send: {} of {} bytes",
                sent,
                frame.len()
            )));
        }
        Ok(())
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.socket.recv(buf)?)
    }
}
