//! Flow-control probes for the output stream.
//!
//! Small interactive-sized writes must never be throttled, while sustained
//! bulk writes on a non-blocking handle must eventually report would-block.

use device::{StreamPair, WriteAttempt};
use logging::trace_probe;

use crate::outcome::{FailureReason, InconclusiveReason, ProbeOutcome};
use crate::pattern::ascending_pattern;

/// Issues one non-blocking write per entry of `sizes`; each must be accepted
/// in full.
pub fn small_writes_never_block(streams: &StreamPair, sizes: &[usize]) -> ProbeOutcome {
    run_small_writes(streams, sizes).into()
}

fn run_small_writes(streams: &StreamPair, sizes: &[usize]) -> Result<(), FailureReason> {
    let mut output = streams.open_output_nonblocking()?;
    let mut offset = 0u64;

    for &size in sizes {
        let buffer = ascending_pattern(size);
        match output.try_write(&buffer)? {
            WriteAttempt::WouldBlock => {
                return Err(FailureReason::UnexpectedWouldBlock { size });
            }
            WriteAttempt::Written(written) if written != size => {
                return Err(FailureReason::ShortWrite {
                    offset,
                    requested: size,
                    written,
                });
            }
            WriteAttempt::Written(written) => offset += written as u64,
        }
    }

    trace_probe!("{} small writes accepted ({offset} bytes)", sizes.len());
    output.close();
    Ok(())
}

/// Repeats `chunk_size`-byte non-blocking writes until the device reports
/// would-block (pass) or `ceiling` bytes were accepted (inconclusive).
pub fn large_writes_eventually_block(
    streams: &StreamPair,
    chunk_size: usize,
    ceiling: u64,
) -> ProbeOutcome {
    let chunk_size = chunk_size.max(1);
    let buffer = ascending_pattern(chunk_size);
    let mut output = match streams.open_output_nonblocking() {
        Ok(output) => output,
        Err(err) => return ProbeOutcome::Fail(err.into()),
    };

    let mut total = 0u64;
    while total < ceiling {
        match output.try_write(&buffer) {
            Ok(WriteAttempt::WouldBlock) => {
                trace_probe!("write blocked after {total} bytes");
                return ProbeOutcome::Pass;
            }
            Ok(WriteAttempt::Written(written)) if written == chunk_size => {
                total += written as u64;
            }
            Ok(WriteAttempt::Written(written)) => {
                return ProbeOutcome::Fail(FailureReason::ShortWrite {
                    offset: total,
                    requested: chunk_size,
                    written,
                });
            }
            Err(err) => return ProbeOutcome::Fail(err.into()),
        }
    }

    tracing::warn!(
        target: "lpc::probe",
        "write() never blocked: {total} bytes accepted without backpressure"
    );
    ProbeOutcome::Inconclusive(InconclusiveReason::NeverBlocked {
        written: total,
        ceiling,
    })
}

/// Writes one `size`-byte pattern buffer through a blocking handle; it must
/// be transferred in full.
pub fn bulk_write_completes(streams: &StreamPair, size: usize) -> ProbeOutcome {
    run_bulk_write(streams, size).into()
}

fn run_bulk_write(streams: &StreamPair, size: usize) -> Result<(), FailureReason> {
    let buffer = ascending_pattern(size);
    let mut output = streams.open_output()?;
    let written = output.write_slice(&buffer)?;
    if written != size {
        return Err(FailureReason::ShortWrite {
            offset: 0,
            requested: size,
            written,
        });
    }
    output.close();
    Ok(())
}
