//! Message alignment across reader reconnects.

use std::time::Duration;

use device::StreamPair;
use probes::{FailureReason, ProbeOutcome, ReconnectSettings, verify_message_alignment};
use test_support::{FifoKeeper, fifo_in, file_in, scratch_dir};

fn quick_reconnect() -> ReconnectSettings {
    ReconnectSettings {
        writer_iterations: 40,
        writer_interval: Duration::from_millis(2),
        reader_iterations: 6,
        reader_pause: Duration::from_millis(1),
        ..ReconnectSettings::default()
    }
}

#[test]
fn replayable_input_is_always_aligned() {
    let dir = scratch_dir();
    let log = file_in(&dir, "log", b"");
    let streams = StreamPair::new(&log, &log);

    let outcome = verify_message_alignment(&streams, &quick_reconnect());
    assert!(outcome.is_pass(), "{outcome}");
}

#[test]
fn fifo_keeps_half_read_messages_across_reconnects() {
    let dir = scratch_dir();
    let bus = fifo_in(&dir, "bus");
    let _keeper = FifoKeeper::open(&bus).expect("keeper");
    let streams = StreamPair::new(&bus, &bus);

    let outcome = verify_message_alignment(&streams, &quick_reconnect());
    assert!(
        matches!(
            outcome,
            ProbeOutcome::Fail(FailureReason::Misaligned {
                iteration: 1,
                offset: 0,
                expected: b'J',
                actual: b'm',
            })
        ),
        "{outcome}"
    );
}

#[test]
fn fifo_without_truncation_stays_aligned() {
    let dir = scratch_dir();
    let bus = fifo_in(&dir, "bus");
    let _keeper = FifoKeeper::open(&bus).expect("keeper");
    let streams = StreamPair::new(&bus, &bus);

    let settings = ReconnectSettings {
        truncate_every: 0,
        ..quick_reconnect()
    };
    let outcome = verify_message_alignment(&streams, &settings);
    assert!(outcome.is_pass(), "{outcome}");
}
