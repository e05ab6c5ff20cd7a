//! Packet definitions
//!
//! Typed in-memory form of the four wire frame kinds.

use super::{CommandRecord, ResponseRecord};

/// Packet kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketKind {
    Command = 0x01,
    Response = 0x02,
    RequestAck = 0x03,
    ReplyAck = 0x04,
}

impl PacketKind {
    /// Parse a kind byte; `None` for anything outside the four known kinds
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(PacketKind::Command),
            0x02 => Some(PacketKind::Response),
            0x03 => Some(PacketKind::RequestAck),
            0x04 => Some(PacketKind::ReplyAck),
            _ => None,
        }
    }
}

/// An acknowledgment record
///
/// Carries only the echoed packet id. Whether it acknowledges a command
/// (request-ack) or a response (reply-ack) is determined by the packet kind
/// it travelled in, not by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckRecord {
    /// Id of the packet being acknowledged
    pub id: u32,
}

impl AckRecord {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

/// A decoded packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Register command from the master
    Command(CommandRecord),

    /// Command response from the slave
    Response(ResponseRecord),

    /// Immediate receipt-ack for a command (slave -> master)
    RequestAck(AckRecord),

    /// Delivery confirmation for a response (master -> slave)
    ReplyAck(AckRecord),
}

impl Packet {
    /// Get the packet kind
    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::Command(_) => PacketKind::Command,
            Packet::Response(_) => PacketKind::Response,
            Packet::RequestAck(_) => PacketKind::RequestAck,
            Packet::ReplyAck(_) => PacketKind::ReplyAck,
        }
    }

    /// Get the sequence id carried by any packet kind
    pub fn id(&self) -> u32 {
        match self {
            Packet::Command(record) => record.id,
            Packet::Response(record) => record.id,
            Packet::RequestAck(ack) | Packet::ReplyAck(ack) => ack.id,
        }
    }
}
