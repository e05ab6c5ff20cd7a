//! Input dispatcher
//!
//! Perpetual worker that blocks on the transport's receive path, decodes each
//! datagram, and routes the typed record onto the matching bounded channel.
//!
//! A corrupt frame must never stop the loop: undecodable datagrams are
//! discarded. When a channel stays full past the bounded wait the record is
//! dropped and a [`LinkEvent::QueueSaturated`] is emitted; the master has not
//! seen a receipt-ack yet and is expected to retransmit.

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{SendTimeoutError, Sender};

use crate::error::LinkError;
use crate::event::{EventSink, LinkEvent, QueueKind};
use crate::protocol::{codec, AckRecord, CommandRecord, Packet};
use crate::transport::Transport;

/// Receive buffer size. Larger than any valid frame so an overlong datagram
/// arrives intact and fails the codec's length check instead of being
/// silently truncated to a decodable prefix.
const RECV_BUF_SIZE: usize = 64;

/// Routes inbound datagrams to the protocol channels
pub struct InputDispatcher {
    transport: Arc<dyn Transport>,
    commands: Sender<CommandRecord>,
    reply_acks: Sender<AckRecord>,
    events: Arc<dyn EventSink>,
    enqueue_timeout: Duration,
}

impl InputDispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        commands: Sender<CommandRecord>,
        reply_acks: Sender<AckRecord>,
        events: Arc<dyn EventSink>,
        enqueue_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            commands,
            reply_acks,
            events,
            enqueue_timeout,
        }
    }

    /// Run the receive loop
    ///
    /// Returns only when the transport reports the link closed or the
    /// processor side of the channels has been dropped; in production wiring
    /// neither happens and the worker lives as long as the process.
    ///
    /// Other receive errors are transient. A connected UDP socket surfaces
    /// ICMP port-unreachable from our own sends as a failed `recv` while the
    /// master is briefly down; the loop must ride that out and keep routing
    /// once the master is back.
    pub fn run(&self) {
        let mut buf = [0u8; RECV_BUF_SIZE];

        loop {
            let len = match self.transport.recv(&mut buf) {
                Ok(len) => len,
                Err(LinkError::Closed(reason)) => {
                    tracing::warn!(%reason, "transport closed, dispatcher stopping");
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "transport receive failed, retrying");
                    continue;
                }
            };

            let packet = match codec::decode(&buf[..len]) {
                Ok(packet) => packet,
                Err(e) => {
                    tracing::debug!(error = %e, len, "discarding undecodable datagram");
                    continue;
                }
            };

            match packet {
                Packet::Command(record) => {
                    if self.route_command(record).is_err() {
                        return;
                    }
                }
                Packet::ReplyAck(ack) => {
                    if self.route_reply_ack(ack).is_err() {
                        return;
                    }
                }
                // Only the slave produces these; seeing one inbound means the
                // wire topology is wrong. Discard, not fatal.
                other => {
                    self.events.emit(LinkEvent::UnexpectedPacket {
                        kind: other.kind(),
                        id: other.id(),
                    });
                }
            }
        }
    }

    /// Enqueue a command with the bounded wait; `Err` means the consumer is gone
    fn route_command(&self, record: CommandRecord) -> Result<(), ()> {
        match self.commands.send_timeout(record, self.enqueue_timeout) {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(record)) => {
                self.events.emit(LinkEvent::QueueSaturated {
                    queue: QueueKind::Command,
                    id: record.id,
                });
                Ok(())
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                tracing::warn!("command channel disconnected, dispatcher stopping");
                Err(())
            }
        }
    }

    /// Enqueue a reply-ack with the bounded wait; `Err` means the consumer is gone
    fn route_reply_ack(&self, ack: AckRecord) -> Result<(), ()> {
        match self.reply_acks.send_timeout(ack, self.enqueue_timeout) {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(ack)) => {
                self.events.emit(LinkEvent::QueueSaturated {
                    queue: QueueKind::ReplyAck,
                    id: ack.id,
                });
                Ok(())
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                tracing::warn!("reply-ack channel disconnected, dispatcher stopping");
                Err(())
            }
        }
    }
}
