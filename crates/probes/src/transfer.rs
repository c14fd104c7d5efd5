//! Chunked loop-back verification.
//!
//! A writer sends the ascending pattern to the output stream in slices of one
//! size while a reader rebuilds it from the input stream in slices of another.
//! The two tasks run on their own threads with their own handles; the only
//! thing they share is the device, whose ordering and integrity are under
//! test.

use std::num::NonZeroUsize;
use std::thread;

use device::StreamPair;
use logging::{trace_probe, trace_transfer};

use crate::outcome::{FailureReason, ProbeOutcome};
use crate::pattern::{ascending_pattern, first_mismatch};

/// Writer and reader slice sizes for one loop-back run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    write_chunk: NonZeroUsize,
    read_chunk: NonZeroUsize,
}

impl ChunkPlan {
    /// Returns `None` when either size is zero.
    #[must_use]
    pub fn new(write_chunk: usize, read_chunk: usize) -> Option<Self> {
        Some(Self {
            write_chunk: NonZeroUsize::new(write_chunk)?,
            read_chunk: NonZeroUsize::new(read_chunk)?,
        })
    }

    /// Bytes per writer call.
    #[must_use]
    pub const fn write_chunk(&self) -> usize {
        self.write_chunk.get()
    }

    /// Bytes per reader call.
    #[must_use]
    pub const fn read_chunk(&self) -> usize {
        self.read_chunk.get()
    }

    /// Returns `true` when neither slice size exceeds `length`.
    #[must_use]
    pub const fn fits(&self, length: usize) -> bool {
        self.write_chunk() <= length && self.read_chunk() <= length
    }

    /// Every plan drawn from `sizes × sizes` that fits `length`.
    ///
    /// Read sizes vary in the outer loop, write sizes in the inner one.
    pub fn matrix(length: usize, sizes: &[usize]) -> impl Iterator<Item = Self> + '_ {
        sizes.iter().flat_map(move |&read_chunk| {
            sizes
                .iter()
                .filter_map(move |&write_chunk| Self::new(write_chunk, read_chunk))
                .filter(move |plan| plan.fits(length))
        })
    }
}

/// Sends `total_length` pattern bytes through the device pair with `plan` and
/// checks the reader reconstructs them exactly.
pub fn verify_loopback(streams: &StreamPair, total_length: usize, plan: ChunkPlan) -> ProbeOutcome {
    run_loopback(streams, total_length, plan).into()
}

/// Runs [`verify_loopback`] for every message length and every fitting
/// chunk plan, stopping at the first failing case.
pub fn loopback_matrix(
    streams: &StreamPair,
    message_lengths: &[usize],
    chunk_sizes: &[usize],
) -> ProbeOutcome {
    for &length in message_lengths {
        let mut cases = 0usize;
        for plan in ChunkPlan::matrix(length, chunk_sizes) {
            if let Err(reason) = run_loopback(streams, length, plan) {
                return ProbeOutcome::Fail(FailureReason::InLoopbackCase {
                    length,
                    write_chunk: plan.write_chunk(),
                    read_chunk: plan.read_chunk(),
                    source: Box::new(reason),
                });
            }
            cases += 1;
        }
        trace_probe!("loopback of {length} bytes verified with {cases} chunk plans");
    }
    ProbeOutcome::Pass
}

fn run_loopback(
    streams: &StreamPair,
    total_length: usize,
    plan: ChunkPlan,
) -> Result<(), FailureReason> {
    let pattern = ascending_pattern(total_length);

    let (written, received) = thread::scope(|scope| {
        let writer = scope.spawn(|| write_in_chunks(streams, &pattern, plan.write_chunk));
        let reader = scope.spawn(|| read_in_chunks(streams, total_length, plan.read_chunk));
        (writer.join(), reader.join())
    });

    written.map_err(|_| FailureReason::WorkerPanicked { role: "writer" })??;
    let received = received.map_err(|_| FailureReason::WorkerPanicked { role: "reader" })??;

    match first_mismatch(&pattern, &received) {
        Some((offset, expected, actual)) => Err(FailureReason::Mismatch {
            offset,
            expected,
            actual,
        }),
        None => Ok(()),
    }
}

fn write_in_chunks(
    streams: &StreamPair,
    pattern: &[u8],
    chunk: NonZeroUsize,
) -> Result<(), FailureReason> {
    let mut output = streams.open_output()?;
    let mut offset = 0u64;
    for slice in pattern.chunks(chunk.get()) {
        let written = output.write_slice(slice)?;
        if written != slice.len() {
            return Err(FailureReason::ShortWrite {
                offset,
                requested: slice.len(),
                written,
            });
        }
        offset += written as u64;
    }
    trace_transfer!("writer sent {offset} bytes in {chunk}-byte slices");
    output.close();
    Ok(())
}

fn read_in_chunks(
    streams: &StreamPair,
    total_length: usize,
    chunk: NonZeroUsize,
) -> Result<Vec<u8>, FailureReason> {
    let mut input = streams.open_input()?;
    let mut received = vec![0u8; total_length];
    let mut offset = 0u64;
    for slice in received.chunks_mut(chunk.get()) {
        let requested = slice.len();
        let read = input.read_slice(slice)?;
        if read != requested {
            return Err(FailureReason::ShortRead {
                offset,
                requested,
                read,
            });
        }
        offset += read as u64;
    }
    trace_transfer!("reader received {offset} bytes in {chunk}-byte slices");
    input.close();
    Ok(received)
}
