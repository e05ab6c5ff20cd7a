//! Command definitions
//!
//! Represents register commands issued by the master.

/// Register operation requested by a command
///
/// The wire carries a raw operation byte. Codes other than READ/WRITE are
/// preserved as [`Operation::Unknown`] so the processor can answer them with
/// a fault response instead of dropping the frame at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read a register (0x00)
    Read,

    /// Write a register (0x01)
    Write,

    /// Unrecognized operation code, carried through verbatim
    Unknown(u8),
}

impl Operation {
    /// Get the wire byte for this operation
    pub fn as_byte(&self) -> u8 {
        match self {
            Operation::Read => 0x00,
            Operation::Write => 0x01,
            Operation::Unknown(code) => *code,
        }
    }

    /// Parse an operation byte (total - unknown codes are preserved)
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Operation::Read,
            0x01 => Operation::Write,
            code => Operation::Unknown(code),
        }
    }
}

/// A parsed register command
///
/// Immutable once decoded; consumed exactly once by the command processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRecord {
    /// Sequence id assigned by the master
    pub id: u32,

    /// Requested operation
    pub operation: Operation,

    /// Target register address
    pub address: u32,

    /// Value to write (ignored for reads)
    pub value: u32,
}

impl CommandRecord {
    /// Create a read command
    pub fn read(id: u32, address: u32) -> Self {
        Self {
            id,
            operation: Operation::Read,
            address,
            value: 0,
        }
    }

    /// Create a write command
    pub fn write(id: u32, address: u32, value: u32) -> Self {
        Self {
            id,
            operation: Operation::Write,
            address,
            value,
        }
    }
}
