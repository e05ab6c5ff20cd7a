//! Link Module
//!
//! The two protocol workers and their shared send path.
//!
//! - [`FrameSender`] serializes every outbound frame behind one lock so
//!   frames are never interleaved on the wire.
//! - [`InputDispatcher`] receives datagrams, decodes them, and routes typed
//!   records onto the bounded command and reply-ack channels.
//! - [`CommandProcessor`] drives the command -> receipt-ack -> response ->
//!   reply-ack handshake with bounded retry.
//! - [`Slave`] wires the channels and runs both workers on their own threads.

mod dispatcher;
mod processor;
mod sender;
mod slave;

pub use dispatcher::InputDispatcher;
pub use processor::CommandProcessor;
pub use sender::FrameSender;
pub use slave::Slave;
