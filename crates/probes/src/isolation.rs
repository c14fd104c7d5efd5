//! Directional isolation: output traffic must not appear on the input.

use device::StreamPair;
use logging::trace_probe;

use crate::outcome::{FailureReason, ProbeOutcome};
use crate::pacing::Pacer;
use crate::pattern::ascending_pattern;

/// Drains the input, writes one buffer to the output, and expects the next
/// input read to return nothing.
pub fn verify_directional_isolation(
    streams: &StreamPair,
    buffer_len: usize,
    pacer: &dyn Pacer,
) -> ProbeOutcome {
    run_isolation(streams, buffer_len.max(1), pacer).into()
}

fn run_isolation(
    streams: &StreamPair,
    buffer_len: usize,
    pacer: &dyn Pacer,
) -> Result<(), FailureReason> {
    let mut input = streams.open_input()?;
    let mut output = streams.open_output()?;

    if let Err(err) = pacer.checkpoint("drain input stream") {
        tracing::warn!(target: "lpc::pacing", "pacing prompt failed: {err}");
    }
    let drained = input.drain(buffer_len)?;
    trace_probe!("input drained ({drained} stale bytes)");

    let payload = ascending_pattern(buffer_len);
    let written = output.write_slice(&payload)?;
    if written != buffer_len {
        return Err(FailureReason::ShortWrite {
            offset: 0,
            requested: buffer_len,
            written,
        });
    }

    let mut probe = vec![0u8; buffer_len];
    let leaked = input.read_once(&mut probe)?;
    if leaked != 0 {
        return Err(FailureReason::CrossTalk { bytes: leaked });
    }

    input.close();
    output.close();
    Ok(())
}
