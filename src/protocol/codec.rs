//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Frame Layout
//!
//! ```text
//! ┌──────────┬──────────────┬──────────┬──────────────┬──────────────┐
//! │ Kind (1) │   Id (4)     │ Sub (1)  │ Address (4)  │  Value (4)   │
//! └──────────┴──────────────┴──────────┴──────────────┴──────────────┘
//!  <-------- ack frame ---->
//!  <------------------------ data frame ---------------------------->
//! ```
//!
//! Command and Response frames are exactly [`DATA_FRAME_SIZE`] bytes; the two
//! ack kinds are exactly [`ACK_FRAME_SIZE`] bytes. All integers big-endian.
//!
//! Decoding fails with `MalformedPacket` when the kind byte is not one of the
//! four recognized values or when the frame length does not match the fixed
//! size for that kind; it is total and side-effect-free otherwise.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{LinkError, Result};

use super::{
    AckRecord, CommandRecord, Operation, Packet, PacketKind, ResponseRecord, ResponseStatus,
};

/// Frame size for RequestAck/ReplyAck: 1 byte kind + 4 bytes id
pub const ACK_FRAME_SIZE: usize = 5;

/// Frame size for Command/Response: ack header + 1 byte sub + 4+4 bytes fields
pub const DATA_FRAME_SIZE: usize = 14;

/// Largest frame the protocol can produce
pub const MAX_FRAME_SIZE: usize = DATA_FRAME_SIZE;

/// Fixed frame size for a packet kind
pub fn frame_size(kind: PacketKind) -> usize {
    match kind {
        PacketKind::Command | PacketKind::Response => DATA_FRAME_SIZE,
        PacketKind::RequestAck | PacketKind::ReplyAck => ACK_FRAME_SIZE,
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a packet to its fixed-size wire frame
pub fn encode(packet: &Packet) -> Vec<u8> {
    let mut frame = BytesMut::with_capacity(frame_size(packet.kind()));
    frame.put_u8(packet.kind() as u8);
    frame.put_u32(packet.id());

    match packet {
        Packet::Command(record) => {
            frame.put_u8(record.operation.as_byte());
            frame.put_u32(record.address);
            frame.put_u32(record.value);
        }
        Packet::Response(record) => {
            frame.put_u8(record.status.as_byte());
            frame.put_u32(record.address);
            frame.put_u32(record.value);
        }
        Packet::RequestAck(_) | Packet::ReplyAck(_) => {}
    }

    frame.to_vec()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a wire frame into a typed packet
pub fn decode(bytes: &[u8]) -> Result<Packet> {
    let kind_byte = *bytes.first().ok_or_else(|| {
        LinkError::MalformedPacket("Empty frame".to_string())
    })?;

    let kind = PacketKind::from_byte(kind_byte).ok_or_else(|| {
        LinkError::MalformedPacket(format!("Unknown packet kind: 0x{:02x}", kind_byte))
    })?;

    let expected = frame_size(kind);
    if bytes.len() != expected {
        return Err(LinkError::MalformedPacket(format!(
            "Bad frame length for kind {:?}: expected {} bytes, got {}",
            kind,
            expected,
            bytes.len()
        )));
    }

    let mut buf = &bytes[1..];
    let id = buf.get_u32();

    let packet = match kind {
        PacketKind::Command => {
            let operation = Operation::from_byte(buf.get_u8());
            let address = buf.get_u32();
            let value = buf.get_u32();
            Packet::Command(CommandRecord {
                id,
                operation,
                address,
                value,
            })
        }
        PacketKind::Response => {
            let status = ResponseStatus::from_byte(buf.get_u8());
            let address = buf.get_u32();
            let value = buf.get_u32();
            Packet::Response(ResponseRecord {
                id,
                status,
                address,
                value,
            })
        }
        PacketKind::RequestAck => Packet::RequestAck(AckRecord::new(id)),
        PacketKind::ReplyAck => Packet::ReplyAck(AckRecord::new(id)),
    };

    Ok(packet)
}
