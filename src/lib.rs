//! # reglink
//!
//! A reliability layer that turns an unreliable datagram transport into a
//! master/slave register command-response protocol with:
//! - Explicit receipt acknowledgment (RequestAck) before execution
//! - Bounded response retry (3 attempts) confirmed by ReplyAck
//! - Strictly sequential handshakes (one outstanding command at a time)
//! - A fixed-capacity history log of recent commands and responses
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Transport                            │
//! │                    (unreliable datagrams)                    │
//! └───────┬──────────────────────────────────────────▲───────────┘
//!         │ recv                                     │ send
//! ┌───────▼───────────┐                     ┌────────┴──────────┐
//! │  InputDispatcher  │                     │    FrameSender    │
//! │ (decode + route)  │                     │ (exclusive lock)  │
//! └───┬───────────┬───┘                     └────────▲──────────┘
//!     │           │                                  │
//!     ▼           ▼                                  │
//! ┌─────────┐ ┌──────────┐                           │
//! │ command │ │reply-ack │    bounded channels       │
//! │ channel │ │ channel  │                           │
//! └────┬────┘ └────┬─────┘                           │
//!      │           │                                 │
//! ┌────▼───────────▼─────────────────────────────────┴──┐
//! │                  CommandProcessor                    │
//! │  AwaitCommand → Execute → AwaitAck(attempt) → Done   │
//! └────────┬─────────────────────────┬───────────────────┘
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐           ┌─────────────┐
//!   │ HistoryLog  │           │  Registers  │
//!   │ (last 10)   │           │ (ext. trait)│
//!   └─────────────┘           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod event;
pub mod history;
pub mod link;
pub mod protocol;
pub mod register;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{LinkError, Result};
pub use event::{EventSink, LinkEvent, QueueKind, TracingSink};
pub use history::HistoryLog;
pub use link::{CommandProcessor, FrameSender, InputDispatcher, Slave};
pub use register::{MemoryRegisters, RegisterAccess};
pub use transport::{ChannelTransport, Transport, UdpTransport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of reglink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
