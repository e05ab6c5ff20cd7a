//! Command processor
//!
//! The protocol state machine. Exactly one instance runs, and it fully
//! resolves (or abandons) each command's handshake before accepting the next,
//! so responses leave in command-acceptance order and a reply-ack can only
//! ever be consumed by the command currently outstanding.
//!
//! Per command:
//! 1. copy to history (fire-and-forget)
//! 2. send the receipt-ack; a send failure is signalled but the handshake
//!    continues optimistically
//! 3. execute the register operation, producing the response
//! 4. clear stale reply-acks, then transmit the response up to the attempt
//!    budget, waiting the bounded ack window after each send

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError};

use crate::event::{EventSink, LinkEvent};
use crate::history::HistoryLog;
use crate::protocol::{codec, AckRecord, CommandRecord, Operation, Packet, ResponseRecord};
use crate::register::RegisterAccess;

use super::FrameSender;

/// Consumes commands and drives the ack/response/retry handshake
pub struct CommandProcessor {
    commands: Receiver<CommandRecord>,
    reply_acks: Receiver<AckRecord>,
    sender: Arc<FrameSender>,
    registers: Arc<dyn RegisterAccess>,
    history: Arc<HistoryLog>,
    events: Arc<dyn EventSink>,
    reply_ack_wait: Duration,
    response_attempts: u32,
}

impl CommandProcessor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        commands: Receiver<CommandRecord>,
        reply_acks: Receiver<AckRecord>,
        sender: Arc<FrameSender>,
        registers: Arc<dyn RegisterAccess>,
        history: Arc<HistoryLog>,
        events: Arc<dyn EventSink>,
        reply_ack_wait: Duration,
        response_attempts: u32,
    ) -> Self {
        Self {
            commands,
            reply_acks,
            sender,
            registers,
            history,
            events,
            reply_ack_wait,
            response_attempts,
        }
    }

    /// Run the processing loop
    ///
    /// Blocks indefinitely between commands. Returns once the command channel
    /// disconnects (dispatcher gone), which in production wiring never
    /// happens.
    pub fn run(&self) {
        while let Ok(command) = self.commands.recv() {
            self.handle(command);
        }
        tracing::debug!("command channel disconnected, processor stopping");
    }

    /// Drive one full handshake
    fn handle(&self, command: CommandRecord) {
        tracing::debug!(id = command.id, op = ?command.operation, "command accepted");
        self.history.record_command(command);

        // Receipt-ack goes out before the command is executed.
        let request_ack = codec::encode(&Packet::RequestAck(AckRecord::new(command.id)));
        if let Err(e) = self.sender.send(&request_ack) {
            tracing::warn!(id = command.id, error = %e, "request-ack send failed");
            self.events.emit(LinkEvent::SendFailed {
                kind: crate::protocol::PacketKind::RequestAck,
                id: command.id,
            });
        }

        let response = self.execute(&command);
        self.confirm_delivery(&command, &response);
    }

    /// Execute the register operation, never failing the protocol:
    /// operational faults become `status=Fault` in the response
    fn execute(&self, command: &CommandRecord) -> ResponseRecord {
        match command.operation {
            Operation::Read => match self.registers.read(command.address) {
                Ok(value) => ResponseRecord::ok(command, value),
                Err(e) => {
                    tracing::debug!(id = command.id, address = command.address, error = %e,
                        "register read faulted");
                    ResponseRecord::fault(command)
                }
            },
            Operation::Write => match self.registers.write(command.address, command.value) {
                Ok(()) => ResponseRecord::ok(command, command.value),
                Err(e) => {
                    tracing::debug!(id = command.id, address = command.address, error = %e,
                        "register write faulted");
                    ResponseRecord::fault(command)
                }
            },
            Operation::Unknown(code) => {
                tracing::debug!(id = command.id, code, "unrecognized operation code");
                ResponseRecord::fault(command)
            }
        }
    }

    /// Transmit the response until a matching reply-ack arrives or the
    /// attempt budget is exhausted
    fn confirm_delivery(&self, command: &CommandRecord, response: &ResponseRecord) {
        // A late ack from an already-abandoned exchange must not be mistaken
        // for this command's ack.
        while self.reply_acks.try_recv().is_ok() {}

        for attempt in 0..self.response_attempts {
            self.history.record_response(*response);

            // Re-encoded per attempt; the frame is not a long-lived object.
            let frame = codec::encode(&Packet::Response(*response));
            if let Err(e) = self.sender.send(&frame) {
                tracing::warn!(id = command.id, attempt, error = %e, "response send failed");
                self.events.emit(LinkEvent::SendFailed {
                    kind: crate::protocol::PacketKind::Response,
                    id: command.id,
                });
            }

            match self.reply_acks.recv_timeout(self.reply_ack_wait) {
                Ok(ack) if ack.id == command.id => {
                    tracing::debug!(id = command.id, attempt, "delivery confirmed");
                    return;
                }
                Ok(ack) => {
                    // Belongs to a different exchange; discard and keep waiting
                    // on the next attempt.
                    tracing::debug!(got = ack.id, outstanding = command.id, "stale reply-ack discarded");
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
            }
        }

        self.events.emit(LinkEvent::DeliveryUnconfirmed {
            id: command.id,
            attempts: self.response_attempts,
        });
    }
}
