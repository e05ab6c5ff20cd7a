//! Diagnostic events
//!
//! Non-fatal protocol conditions are reified as structured events and pushed
//! through an injectable sink, so failure behavior is observable (and
//! testable) instead of a silent no-op.

use crate::protocol::PacketKind;

/// Which bounded channel saturated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    Command,
    ReplyAck,
}

/// A non-fatal protocol condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// An inbound record was dropped because its channel stayed full past
    /// the bounded wait; the master will retransmit
    QueueSaturated { queue: QueueKind, id: u32 },

    /// No matching reply-ack arrived within the attempt budget; the command
    /// is abandoned and the processor resumes accepting commands
    DeliveryUnconfirmed { id: u32, attempts: u32 },

    /// A frame could not be written to the transport; the handshake
    /// proceeds optimistically
    SendFailed { kind: PacketKind, id: u32 },

    /// An inbound kind only the slave should produce was received and
    /// discarded; indicates a topology error on the wire
    UnexpectedPacket { kind: PacketKind, id: u32 },
}

/// Sink for diagnostic events
///
/// Implementations must be cheap and non-blocking; both workers emit from
/// their hot loops.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: LinkEvent);
}

/// Default sink: logs every event at warn level via `tracing`
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: LinkEvent) {
        match event {
            LinkEvent::QueueSaturated { queue, id } => {
                tracing::warn!(?queue, id, "inbound record dropped, queue saturated");
            }
            LinkEvent::DeliveryUnconfirmed { id, attempts } => {
                tracing::warn!(id, attempts, "no reply-ack, delivery unconfirmed");
            }
            LinkEvent::SendFailed { kind, id } => {
                tracing::warn!(?kind, id, "transport send failed");
            }
            LinkEvent::UnexpectedPacket { kind, id } => {
                tracing::warn!(?kind, id, "unexpected inbound packet kind discarded");
            }
        }
    }
}
