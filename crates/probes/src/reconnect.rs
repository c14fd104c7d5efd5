//! Message alignment across reader reconnects.
//!
//! A writer keeps resending one short message while the reader repeatedly
//! closes and reopens the input stream, sometimes after reading only half a
//! message. Every full read must start at a message boundary.

use std::thread;

use device::StreamPair;
use logging::{trace_probe, trace_transfer};

use crate::outcome::{FailureReason, ProbeOutcome};
use crate::pattern::first_mismatch;
use crate::settings::ReconnectSettings;

/// Checks that reads after a reconnect never start mid-message.
pub fn verify_message_alignment(streams: &StreamPair, settings: &ReconnectSettings) -> ProbeOutcome {
    run_alignment(streams, settings).into()
}

fn run_alignment(streams: &StreamPair, settings: &ReconnectSettings) -> Result<(), FailureReason> {
    let (written, read) = thread::scope(|scope| {
        let writer = scope.spawn(|| resend_message(streams, settings));
        let reader = scope.spawn(|| read_across_reconnects(streams, settings));
        (writer.join(), reader.join())
    });

    read.map_err(|_| FailureReason::WorkerPanicked { role: "reader" })??;
    written.map_err(|_| FailureReason::WorkerPanicked { role: "writer" })??;
    Ok(())
}

fn resend_message(streams: &StreamPair, settings: &ReconnectSettings) -> Result<(), FailureReason> {
    let message = settings.message.as_slice();
    let mut output = streams.open_output()?;
    let mut offset = 0u64;

    for _ in 0..settings.writer_iterations {
        let written = output.write_slice(message)?;
        if written != message.len() {
            return Err(FailureReason::ShortWrite {
                offset,
                requested: message.len(),
                written,
            });
        }
        offset += written as u64;
        thread::sleep(settings.writer_interval);
    }

    trace_transfer!("writer sent {} messages", settings.writer_iterations);
    output.close();
    Ok(())
}

fn read_across_reconnects(
    streams: &StreamPair,
    settings: &ReconnectSettings,
) -> Result<(), FailureReason> {
    let message = settings.message.as_slice();
    let half = message.len() / 2;
    let mut buffer = vec![0u8; message.len()];
    let mut checked = 0usize;

    for iteration in 0..settings.reader_iterations {
        let mut input = streams.open_input()?;

        if settings.truncate_every > 0 && iteration.is_multiple_of(settings.truncate_every) {
            let read = input.read_slice(&mut buffer[..half])?;
            trace_transfer!("reconnect {iteration}: abandoned message after {read} bytes");
        } else {
            let read = input.read_slice(&mut buffer)?;
            if let Some((offset, expected, actual)) = first_mismatch(message, &buffer[..read]) {
                return Err(FailureReason::Misaligned {
                    iteration,
                    offset,
                    expected,
                    actual,
                });
            }
            trace_transfer!("reconnect {iteration}: {read} aligned bytes");
            checked += 1;
        }

        input.close();
        thread::sleep(settings.reader_pause);
    }

    trace_probe!("{checked} full reads started at a message boundary");
    Ok(())
}
