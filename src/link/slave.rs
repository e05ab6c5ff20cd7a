//! Slave assembly
//!
//! Wires the bounded channels between the two workers and runs each on its
//! own thread. The channels are owned here and handed to the workers
//! explicitly, so unit tests can drive either worker with fake channels.

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::bounded;

use crate::config::Config;
use crate::error::Result;
use crate::event::EventSink;
use crate::history::HistoryLog;
use crate::register::RegisterAccess;
use crate::transport::Transport;

use super::{CommandProcessor, FrameSender, InputDispatcher};

/// A running protocol slave: one dispatcher thread, one processor thread
pub struct Slave {
    dispatcher: JoinHandle<()>,
    processor: JoinHandle<()>,
    history: Arc<HistoryLog>,
}

impl Slave {
    /// Spawn both workers over the given transport
    ///
    /// The workers run until the transport reports the link closed, at which
    /// point the dispatcher exits, the channels disconnect, and the processor
    /// follows. Transient receive errors do not stop them.
    pub fn spawn(
        config: Config,
        transport: Arc<dyn Transport>,
        registers: Arc<dyn RegisterAccess>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let (command_tx, command_rx) = bounded(config.command_queue_capacity);
        let (reply_ack_tx, reply_ack_rx) = bounded(config.reply_ack_queue_capacity);

        let history = Arc::new(HistoryLog::new(config.history_capacity));
        let sender = Arc::new(FrameSender::new(Arc::clone(&transport)));

        let dispatcher = InputDispatcher::new(
            transport,
            command_tx,
            reply_ack_tx,
            Arc::clone(&events),
            config.enqueue_timeout,
        );
        let processor = CommandProcessor::new(
            command_rx,
            reply_ack_rx,
            sender,
            registers,
            Arc::clone(&history),
            events,
            config.reply_ack_wait,
            config.response_attempts,
        );

        tracing::info!(
            command_queue = config.command_queue_capacity,
            reply_ack_queue = config.reply_ack_queue_capacity,
            attempts = config.response_attempts,
            "starting reglink slave workers"
        );

        let dispatcher = std::thread::Builder::new()
            .name("reglink-dispatch".to_string())
            .spawn(move || dispatcher.run())?;
        let processor_handle = std::thread::Builder::new()
            .name("reglink-process".to_string())
            .spawn(move || processor.run())?;

        Ok(Self {
            dispatcher,
            processor: processor_handle,
            history,
        })
    }

    /// Shared history log for audit/diagnostics
    pub fn history(&self) -> Arc<HistoryLog> {
        Arc::clone(&self.history)
    }

    /// Wait for both workers to stop
    ///
    /// Only returns after the transport has gone away; used by tests and by
    /// hosts that tear the link down.
    pub fn join(self) {
        let _ = self.dispatcher.join();
        let _ = self.processor.join();
    }
}
