//! In-memory transport
//!
//! A pair of linked endpoints exchanging whole datagrams over crossbeam
//! channels. Lossless and ordered by itself; tests drive loss and reordering
//! explicitly by holding one endpoint and choosing what to deliver.

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::error::{LinkError, Result};

use super::Transport;

/// One endpoint of an in-memory datagram link
pub struct ChannelTransport {
    outbound: Sender<Vec<u8>>,
    inbound: Receiver<Vec<u8>>,
}

impl ChannelTransport {
    /// Create a linked pair of endpoints
    ///
    /// Frames sent on one endpoint arrive at the other, in order.
    pub fn pair() -> (ChannelTransport, ChannelTransport) {
        let (a_tx, a_rx) = unbounded();
        let (b_tx, b_rx) = unbounded();

        let a = ChannelTransport {
            outbound: a_tx,
            inbound: b_rx,
        };
        let b = ChannelTransport {
            outbound: b_tx,
            inbound: a_rx,
        };
        (a, b)
    }
}

impl Transport for ChannelTransport {
    fn send(&self, frame: &[u8]) -> Result<()> {
        self.outbound
            .send(frame.to_vec())
            .map_err(|_| LinkError::Transport("Peer endpoint dropped".to_string()))
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize> {
        let frame = self
            .inbound
            .recv()
            .map_err(|_| LinkError::Closed("Peer endpoint dropped".to_string()))?;

        if frame.len() > buf.len() {
            return Err(LinkError::Transport(format!(
                "Datagram of {} bytes exceeds receive buffer of {}",
                frame.len(),
                buf.len()
            )));
        }

        buf[..frame.len()].copy_from_slice(&frame);
        Ok(frame.len())
    }
}
