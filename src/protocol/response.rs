//! Response definitions
//!
//! Represents the slave's answer to a command.

use super::{CommandRecord, Operation};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResponseStatus {
    Fault = 0x00,
    Ok = 0x01,
}

impl ResponseStatus {
    /// Get the wire byte for this status
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Parse a status byte
    ///
    /// Total by design: a conforming master only ever sends 0x00/0x01, so
    /// anything else is read as a fault rather than rejecting the frame.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => ResponseStatus::Ok,
            _ => ResponseStatus::Fault,
        }
    }
}

/// A response to send back to the master
///
/// `id` and `address` always echo the originating command; `value` is the
/// register's current value after a successful operation of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRecord {
    /// Sequence id echoed from the command
    pub id: u32,

    /// Outcome of the register operation
    pub status: ResponseStatus,

    /// Register address echoed from the command
    pub address: u32,

    /// Register value after the operation (zero on fault)
    pub value: u32,
}

impl ResponseRecord {
    /// Create an OK response for a command
    pub fn ok(command: &CommandRecord, value: u32) -> Self {
        Self {
            id: command.id,
            status: ResponseStatus::Ok,
            address: command.address,
            value,
        }
    }

    /// Create a FAULT response for a command
    ///
    /// A failed write still echoes the value the master asked for; a failed
    /// read (or an unknown operation) leaves the value at zero.
    pub fn fault(command: &CommandRecord) -> Self {
        let value = match command.operation {
            Operation::Write => command.value,
            _ => 0,
        };
        Self {
            id: command.id,
            status: ResponseStatus::Fault,
            address: command.address,
            value,
        }
    }
}
