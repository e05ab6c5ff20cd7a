//! Protocol Module
//!
//! Defines the wire protocol between the master and the slave.
//!
//! ## Wire Format (V1 - Fixed Binary Layout)
//!
//! ```text
//! ┌──────────┬──────────────┬──────────┬──────────────┬──────────────┐
//! │ Kind (1) │   Id (4)     │ Sub (1)  │ Address (4)  │  Value (4)   │
//! └──────────┴──────────────┴──────────┴──────────────┴──────────────┘
//! ```
//!
//! ### Packet Kinds
//! - 0x01: COMMAND     - full 14-byte frame, `sub` is the operation code
//! - 0x02: RESPONSE    - full 14-byte frame, `sub` is the response status
//! - 0x03: REQUEST_ACK - 5-byte frame (kind + id only)
//! - 0x04: REPLY_ACK   - 5-byte frame (kind + id only)
//!
//! ### Operation Codes (Command `sub`)
//! - 0x00: READ register
//! - 0x01: WRITE register
//!
//! ### Status Codes (Response `sub`)
//! - 0x00: FAULT
//! - 0x01: OK
//!
//! All multi-byte integers are big-endian. The `id` is assigned by the master
//! and echoed unchanged in the Response and both ack kinds.

mod command;
mod packet;
mod response;

pub mod codec;

pub use command::{CommandRecord, Operation};
pub use packet::{AckRecord, Packet, PacketKind};
pub use response::{ResponseRecord, ResponseStatus};
pub use codec::{decode, encode, ACK_FRAME_SIZE, DATA_FRAME_SIZE, MAX_FRAME_SIZE};
