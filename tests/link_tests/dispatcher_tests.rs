//! Input Dispatcher Tests
//!
//! Feeds raw datagrams into the dispatcher over an in-memory transport and
//! observes what lands on the typed channels.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam::channel::{bounded, Receiver};

use reglink::protocol::{
    encode, AckRecord, CommandRecord, Packet, PacketKind, ResponseRecord, ResponseStatus,
};
use reglink::{ChannelTransport, InputDispatcher, LinkEvent, QueueKind, Transport};

use crate::common::CollectorSink;

const ENQUEUE_TIMEOUT: Duration = Duration::from_millis(20);
const RECV_DEADLINE: Duration = Duration::from_secs(1);

struct Harness {
    /// Master's end of the wire: everything sent here reaches the dispatcher
    master: ChannelTransport,
    commands: Receiver<CommandRecord>,
    reply_acks: Receiver<AckRecord>,
    events: Receiver<LinkEvent>,
    worker: JoinHandle<()>,
}

fn spawn_dispatcher(command_capacity: usize) -> Harness {
    let (near, master) = ChannelTransport::pair();
    let (command_tx, command_rx) = bounded(command_capacity);
    let (reply_ack_tx, reply_ack_rx) = bounded(1);
    let (sink, events) = CollectorSink::new();

    let dispatcher = InputDispatcher::new(
        Arc::new(near),
        command_tx,
        reply_ack_tx,
        sink,
        ENQUEUE_TIMEOUT,
    );
    let worker = std::thread::spawn(move || dispatcher.run());

    Harness {
        master,
        commands: command_rx,
        reply_acks: reply_ack_rx,
        events,
        worker,
    }
}

// =============================================================================
// Routing
// =============================================================================

#[test]
fn test_commands_and_reply_acks_routed_by_kind() {
    let h = spawn_dispatcher(10);

    let command = CommandRecord::write(5, 0x10, 7);
    h.master.send(&encode(&Packet::Command(command))).unwrap();
    h.master
        .send(&encode(&Packet::ReplyAck(AckRecord::new(5))))
        .unwrap();

    assert_eq!(h.commands.recv_timeout(RECV_DEADLINE).unwrap(), command);
    assert_eq!(
        h.reply_acks.recv_timeout(RECV_DEADLINE).unwrap(),
        AckRecord::new(5)
    );
}

#[test]
fn test_malformed_datagram_does_not_stop_the_loop() {
    let h = spawn_dispatcher(10);

    // Garbage, a truncated frame, and an unknown kind byte
    h.master.send(&[0xff, 0x00, 0x01]).unwrap();
    h.master.send(&[0x01, 0x00]).unwrap();
    h.master.send(&[0x09, 0, 0, 0, 1]).unwrap();

    // A valid command after the garbage still gets through
    let command = CommandRecord::read(6, 0x20);
    h.master.send(&encode(&Packet::Command(command))).unwrap();
    assert_eq!(h.commands.recv_timeout(RECV_DEADLINE).unwrap(), command);
}

#[test]
fn test_slave_only_kinds_are_discarded() {
    let h = spawn_dispatcher(10);

    h.master
        .send(&encode(&Packet::RequestAck(AckRecord::new(4))))
        .unwrap();
    h.master
        .send(&encode(&Packet::Response(ResponseRecord {
            id: 4,
            status: ResponseStatus::Ok,
            address: 0x10,
            value: 0,
        })))
        .unwrap();

    let event = h.events.recv_timeout(RECV_DEADLINE).unwrap();
    assert_eq!(
        event,
        LinkEvent::UnexpectedPacket {
            kind: PacketKind::RequestAck,
            id: 4
        }
    );
    let event = h.events.recv_timeout(RECV_DEADLINE).unwrap();
    assert_eq!(
        event,
        LinkEvent::UnexpectedPacket {
            kind: PacketKind::Response,
            id: 4
        }
    );
    assert!(h.commands.try_recv().is_err());
    assert!(h.reply_acks.try_recv().is_err());
}

// =============================================================================
// Backpressure
// =============================================================================

#[test]
fn test_full_reply_ack_queue_drops_and_signals() {
    // The reply-ack channel has capacity 1; with nobody consuming, a second
    // ack must be dropped after the bounded wait, with a saturation event.
    let h = spawn_dispatcher(10);

    h.master
        .send(&encode(&Packet::ReplyAck(AckRecord::new(1))))
        .unwrap();
    h.master
        .send(&encode(&Packet::ReplyAck(AckRecord::new(2))))
        .unwrap();

    let event = h.events.recv_timeout(RECV_DEADLINE).unwrap();
    assert_eq!(
        event,
        LinkEvent::QueueSaturated {
            queue: QueueKind::ReplyAck,
            id: 2
        }
    );

    // The first ack is still queued; the dropped one is gone.
    assert_eq!(h.reply_acks.recv_timeout(RECV_DEADLINE).unwrap().id, 1);
    assert!(h.reply_acks.try_recv().is_err());
}

#[test]
fn test_full_command_queue_drops_and_signals() {
    // Capacity 1 and nobody consuming: the second command must be dropped
    // after the bounded wait, with a saturation event.
    let h = spawn_dispatcher(1);

    h.master
        .send(&encode(&Packet::Command(CommandRecord::read(1, 0x10))))
        .unwrap();
    h.master
        .send(&encode(&Packet::Command(CommandRecord::read(2, 0x10))))
        .unwrap();

    let event = h.events.recv_timeout(RECV_DEADLINE).unwrap();
    assert_eq!(
        event,
        LinkEvent::QueueSaturated {
            queue: QueueKind::Command,
            id: 2
        }
    );

    // The first command is still queued; the dropped one is gone.
    assert_eq!(h.commands.recv_timeout(RECV_DEADLINE).unwrap().id, 1);
    assert!(h.commands.try_recv().is_err());
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Wraps the in-memory link and fails the first few receives, the way a
/// connected UDP socket surfaces ICMP connection-refused after a send to a
/// briefly-absent peer.
struct FlakyTransport {
    inner: ChannelTransport,
    recv_failures: AtomicUsize,
}

impl Transport for FlakyTransport {
    fn send(&self, frame: &[u8]) -> reglink::Result<()> {
        self.inner.send(frame)
    }

    fn recv(&self, buf: &mut [u8]) -> reglink::Result<usize> {
        let failed = self
            .recv_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into());
        }
        self.inner.recv(buf)
    }
}

#[test]
fn test_dispatcher_survives_transient_recv_errors() {
    // Receive errors that do not mean "link closed" must not kill the loop:
    // a command sent after the errors subside is still routed.
    let (near, master) = ChannelTransport::pair();
    let flaky = FlakyTransport {
        inner: near,
        recv_failures: AtomicUsize::new(3),
    };
    let (command_tx, command_rx) = bounded(10);
    let (reply_ack_tx, _reply_ack_rx) = bounded::<AckRecord>(1);
    let (sink, _events) = CollectorSink::new();

    let dispatcher = InputDispatcher::new(
        Arc::new(flaky),
        command_tx,
        reply_ack_tx,
        sink,
        ENQUEUE_TIMEOUT,
    );
    let worker = std::thread::spawn(move || dispatcher.run());

    let command = CommandRecord::read(1, 0x10);
    master.send(&encode(&Packet::Command(command))).unwrap();
    assert_eq!(command_rx.recv_timeout(RECV_DEADLINE).unwrap(), command);

    // A closed link still stops the worker.
    drop(master);
    worker.join().unwrap();
}

#[test]
fn test_dispatcher_stops_when_transport_closes() {
    let h = spawn_dispatcher(10);

    drop(h.master);
    h.worker.join().unwrap();
}

#[test]
fn test_dispatcher_stops_when_consumer_is_gone() {
    let h = spawn_dispatcher(10);

    drop(h.commands);
    h.master
        .send(&encode(&Packet::Command(CommandRecord::read(1, 0x10))))
        .unwrap();

    h.worker.join().unwrap();
}
