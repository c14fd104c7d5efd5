//! Open/close and plain-write smoke probes.

use std::thread;

use device::StreamPair;
use logging::{trace_probe, trace_transfer};

use crate::outcome::{FailureReason, ProbeOutcome};
use crate::pattern::ascending_pattern;
use crate::settings::PatternChunkSettings;

/// Opens the input for reading and the output for appending, then closes
/// both.
pub fn streams_can_be_opened(streams: &StreamPair) -> ProbeOutcome {
    open_and_close(streams).into()
}

/// Repeats [`streams_can_be_opened`] `iterations` times.
pub fn streams_can_be_reopened(streams: &StreamPair, iterations: usize) -> ProbeOutcome {
    let result = (0..iterations).try_for_each(|_| open_and_close(streams));
    if result.is_ok() {
        trace_probe!("streams reopened {iterations} times");
    }
    result.into()
}

fn open_and_close(streams: &StreamPair) -> Result<(), FailureReason> {
    let input = streams.open_input()?;
    let output = streams.open_output()?;
    input.close();
    output.close();
    Ok(())
}

/// Writes a `len`-byte ascending pattern to the output in one call.
pub fn write_ascending_pattern(streams: &StreamPair, len: usize) -> ProbeOutcome {
    let pattern = ascending_pattern(len);
    write_all_slices(streams, &pattern, len.max(1), None).into()
}

/// Writes `chunks` slices of `chunk_len` pattern bytes, pausing after each.
pub fn write_ascending_pattern_in_chunks(
    streams: &StreamPair,
    settings: &PatternChunkSettings,
) -> ProbeOutcome {
    let pattern = ascending_pattern(settings.chunk_len * settings.chunks);
    write_all_slices(streams, &pattern, settings.chunk_len.max(1), Some(settings)).into()
}

fn write_all_slices(
    streams: &StreamPair,
    pattern: &[u8],
    chunk_len: usize,
    paced: Option<&PatternChunkSettings>,
) -> Result<(), FailureReason> {
    let mut output = streams.open_output()?;
    let mut offset = 0u64;

    for slice in pattern.chunks(chunk_len) {
        let written = output.write_slice(slice)?;
        if written != slice.len() {
            return Err(FailureReason::ShortWrite {
                offset,
                requested: slice.len(),
                written,
            });
        }
        offset += written as u64;
        if let Some(settings) = paced {
            trace_transfer!("chunk written, {offset} bytes so far");
            thread::sleep(settings.pause);
        }
    }

    output.close();
    Ok(())
}
