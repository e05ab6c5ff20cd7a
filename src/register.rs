//! Register access
//!
//! The slave executes commands against hardware-backed registers. The
//! hardware is an external collaborator, abstracted behind [`RegisterAccess`];
//! [`MemoryRegisters`] is an in-memory bank for tests and integration.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{LinkError, Result};

/// Register read/write capability consumed by the command processor
pub trait RegisterAccess: Send + Sync {
    /// Read the current value of a register
    fn read(&self, address: u32) -> Result<u32>;

    /// Write a value to a register
    fn write(&self, address: u32, value: u32) -> Result<()>;
}

/// In-memory register bank
///
/// Reads of never-written addresses fail, mirroring a device that rejects
/// access to unmapped registers.
#[derive(Default)]
pub struct MemoryRegisters {
    registers: RwLock<HashMap<u32, u32>>,
}

impl MemoryRegisters {
    /// Create an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bank pre-loaded with `(address, value)` pairs
    pub fn with_values(values: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            registers: RwLock::new(values.into_iter().collect()),
        }
    }
}

impl RegisterAccess for MemoryRegisters {
    fn read(&self, address: u32) -> Result<u32> {
        self.registers
            .read()
            .get(&address)
            .copied()
            .ok_or_else(|| LinkError::Register(format!("Unmapped register 0x{:08x}", address)))
    }

    fn write(&self, address: u32, value: u32) -> Result<()> {
        self.registers.write().insert(address, value);
        Ok(())
    }
}
