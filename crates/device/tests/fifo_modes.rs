//! Open modes and single-call semantics against a real FIFO.

use std::io::ErrorKind;

use device::{AccessMode, DeviceError, DeviceOptions, StreamPair, WriteAttempt};
use test_support::{FifoKeeper, fifo_in, fill_fifo, scratch_dir};

#[test]
fn nonblocking_write_to_full_fifo_would_block() {
    let dir = scratch_dir();
    let bus = fifo_in(&dir, "bus");
    let _keeper = FifoKeeper::open(&bus).expect("keeper");
    let (_filler, filled) = fill_fifo(&bus).expect("fill");
    assert!(filled > 0);

    let mut output = StreamPair::new(&bus, &bus)
        .open_output_nonblocking()
        .expect("open output");
    assert!(output.options().is_nonblocking());
    assert!(output.options().is_synchronous());
    assert_eq!(output.try_write(b"x").expect("write"), WriteAttempt::WouldBlock);
}

#[test]
fn nonblocking_write_to_fifo_without_reader_fails_to_open() {
    let dir = scratch_dir();
    let bus = fifo_in(&dir, "bus");

    let err = StreamPair::new(&bus, &bus)
        .open_output_nonblocking()
        .expect_err("no reader");
    assert!(matches!(
        err,
        DeviceError::Open {
            mode: AccessMode::Append,
            ..
        }
    ));
    assert_eq!(err.path(), bus.as_path());
}

#[test]
fn slice_transfers_cross_a_fifo_in_order() {
    let dir = scratch_dir();
    let bus = fifo_in(&dir, "bus");
    let _keeper = FifoKeeper::open(&bus).expect("keeper");

    let mut output = DeviceOptions::append().open(&bus).expect("open output");
    let mut input = DeviceOptions::read()
        .nonblocking(true)
        .open(&bus)
        .expect("open input");

    assert_eq!(output.write_slice(b"hello, bus").expect("write"), 10);
    let mut first = [0u8; 5];
    assert_eq!(input.read_slice(&mut first).expect("read"), 5);
    assert_eq!(&first, b"hello");

    let mut rest = [0u8; 5];
    assert_eq!(input.read_once(&mut rest).expect("read"), 5);
    assert_eq!(&rest, b", bus");
}

#[test]
fn drained_fifo_reports_would_block_as_error() {
    let dir = scratch_dir();
    let bus = fifo_in(&dir, "bus");
    let _keeper = FifoKeeper::open(&bus).expect("keeper");
    let _writer = DeviceOptions::append().open(&bus).expect("open output");

    let mut input = DeviceOptions::read()
        .nonblocking(true)
        .open(&bus)
        .expect("open input");
    let err = input.read_once(&mut [0u8; 8]).expect_err("empty fifo");
    assert_eq!(err.kind(), ErrorKind::WouldBlock);
}
