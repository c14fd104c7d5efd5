//! Tunable constants of every probe.
//!
//! [`ProbeSettings::default`] reproduces the values the harness is calibrated
//! for on real hardware; tests shrink them to keep runs short.

use std::time::Duration;

/// One mebibyte.
pub const ONE_MIB: usize = 1024 * 1024;

/// One gibibyte.
pub const ONE_GIB: u64 = 1024 * 1024 * 1024;

/// Chunk sizes straddling power-of-two boundaries, plus small primes.
pub const INTERESTING_CHUNK_SIZES: [usize; 18] = [
    1, 2, 3, 5, 7, 9, 63, 64, 65, 127, 128, 129, 1023, 1024, 1025, 2047, 2048, 2049,
];

/// Loop-back message lengths.
pub const MESSAGE_LENGTHS: [usize; 16] = [
    1, 2, 12, 13, 63, 64, 65, 127, 128, 129, 1023, 1024, 1025, 2047, 2048, 2049,
];

/// Sizes of the writes that must never block.
pub const SMALL_WRITE_SIZES: [usize; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Settings for the reconnection probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconnectSettings {
    /// Message the writer repeats.
    pub message: Vec<u8>,
    /// Number of messages written.
    pub writer_iterations: usize,
    /// Pause between messages.
    pub writer_interval: Duration,
    /// Number of reader reconnects.
    pub reader_iterations: usize,
    /// Pause after each reader iteration.
    pub reader_pause: Duration,
    /// Iterations whose index is a multiple of this read only half a message.
    /// Zero disables truncated reads.
    pub truncate_every: usize,
}

impl Default for ReconnectSettings {
    fn default() -> Self {
        Self {
            message: b"Just a message".to_vec(),
            writer_iterations: 100,
            writer_interval: Duration::from_millis(11),
            reader_iterations: 50,
            reader_pause: Duration::from_millis(13),
            truncate_every: 3,
        }
    }
}

/// Settings for the chunked ascending-pattern write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternChunkSettings {
    /// Bytes per chunk.
    pub chunk_len: usize,
    /// Number of chunks.
    pub chunks: usize,
    /// Pause after each chunk.
    pub pause: Duration,
}

impl Default for PatternChunkSettings {
    fn default() -> Self {
        Self {
            chunk_len: 20,
            chunks: 10,
            pause: Duration::from_secs(1),
        }
    }
}

/// Settings for the parameter message burst.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterMessageSettings {
    /// Records emitted. Record ids are `i32`, so the count stays within `u16`.
    pub count: u16,
    /// Records per batch; each batch ends with `fsync`.
    pub batch: usize,
    /// Pause before retrying a would-block write.
    pub retry_pause: Duration,
    /// Retries allowed for one record before the probe fails.
    pub max_retries: u32,
}

impl Default for ParameterMessageSettings {
    fn default() -> Self {
        Self {
            count: 400,
            batch: 50,
            retry_pause: Duration::from_secs(1),
            max_retries: 30,
        }
    }
}

/// Every constant used by the probes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Candidate writer and reader chunk sizes for the loop-back matrix.
    pub chunk_sizes: Vec<usize>,
    /// Loop-back message lengths.
    pub message_lengths: Vec<usize>,
    /// Writes that must complete without blocking.
    pub small_write_sizes: Vec<usize>,
    /// Size of each bulk write.
    pub large_write_size: usize,
    /// Bytes after which bulk writes stop if the device never pushed back.
    pub write_ceiling: u64,
    /// Reconnection probe settings.
    pub reconnect: ReconnectSettings,
    /// Read and write buffer size of the isolation probe.
    pub isolation_buffer: usize,
    /// Open/close cycles of the reopen probe.
    pub reopen_iterations: usize,
    /// Length of the single ascending-pattern write.
    pub ascending_pattern_len: usize,
    /// Chunked ascending-pattern write settings.
    pub pattern_chunks: PatternChunkSettings,
    /// Parameter message burst settings.
    pub parameter_messages: ParameterMessageSettings,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            chunk_sizes: INTERESTING_CHUNK_SIZES.to_vec(),
            message_lengths: MESSAGE_LENGTHS.to_vec(),
            small_write_sizes: SMALL_WRITE_SIZES.to_vec(),
            large_write_size: ONE_MIB,
            write_ceiling: ONE_GIB,
            reconnect: ReconnectSettings::default(),
            isolation_buffer: 1024,
            reopen_iterations: 100,
            ascending_pattern_len: 20,
            pattern_chunks: PatternChunkSettings::default(),
            parameter_messages: ParameterMessageSettings::default(),
        }
    }
}
