//! Probe outcomes and failure reasons.

use std::fmt;

use device::DeviceError;

/// Why a probe failed. Every variant is a device contract violation or a
/// setup failure that prevents checking the contract.
#[derive(Debug, thiserror::Error)]
pub enum FailureReason {
    /// A write transferred fewer bytes than requested.
    #[error("short write at stream offset {offset}: requested {requested} bytes, device accepted {written}")]
    ShortWrite {
        /// Bytes already written before this call.
        offset: u64,
        /// Bytes requested by this call.
        requested: usize,
        /// Bytes actually transferred.
        written: usize,
    },

    /// A read ended before the requested slice was filled.
    #[error("short read at stream offset {offset}: requested {requested} bytes, device returned {read}")]
    ShortRead {
        /// Bytes already read before this call.
        offset: u64,
        /// Bytes requested by this call.
        requested: usize,
        /// Bytes actually returned.
        read: usize,
    },

    /// Reconstructed data differs from what was written.
    #[error("byte mismatch at offset {offset}: expected {expected:#04x}, read {actual:#04x}")]
    Mismatch {
        /// First differing offset.
        offset: usize,
        /// Byte that was written.
        expected: u8,
        /// Byte that was read.
        actual: u8,
    },

    /// A small non-blocking write reported would-block.
    #[error("{size}-byte non-blocking write reported would-block")]
    UnexpectedWouldBlock {
        /// Size of the rejected write.
        size: usize,
    },

    /// A non-blocking write kept reporting would-block.
    #[error("write still blocked after {attempts} attempts")]
    Stalled {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// A full read after reconnecting did not start at a message boundary.
    #[error(
        "read after reconnect {iteration} is not message aligned: byte {offset} is {actual:#04x}, expected {expected:#04x}"
    )]
    Misaligned {
        /// Reader iteration that observed the splice.
        iteration: usize,
        /// Offset within the message.
        offset: usize,
        /// Message byte at that offset.
        expected: u8,
        /// Byte actually read.
        actual: u8,
    },

    /// Output traffic showed up on the input stream.
    #[error("{bytes} bytes appeared on the input stream after writing to the output stream")]
    CrossTalk {
        /// Bytes read from the drained input.
        bytes: usize,
    },

    /// A device node could not be opened or used.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// A worker thread panicked.
    #[error("{role} task panicked")]
    WorkerPanicked {
        /// `writer` or `reader`.
        role: &'static str,
    },

    /// A loop-back matrix case failed.
    #[error("loopback of {length} bytes (write chunk {write_chunk}, read chunk {read_chunk}): {source}")]
    InLoopbackCase {
        /// Message length.
        length: usize,
        /// Writer chunk size.
        write_chunk: usize,
        /// Reader chunk size.
        read_chunk: usize,
        /// Failure of that case.
        #[source]
        source: Box<FailureReason>,
    },
}

/// Why a probe could neither confirm nor refute the contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InconclusiveReason {
    /// Bulk non-blocking writes reached the ceiling without backpressure.
    #[error("write() never blocked: {written} bytes accepted without backpressure (ceiling {ceiling})")]
    NeverBlocked {
        /// Total bytes accepted.
        written: u64,
        /// Ceiling that stopped the probe.
        ceiling: u64,
    },
}

/// Result of running one probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The device honored the contract.
    Pass,
    /// The device violated the contract or could not be used.
    Fail(FailureReason),
    /// The probe could not demonstrate the property either way.
    Inconclusive(InconclusiveReason),
}

impl ProbeOutcome {
    /// Returns `true` for [`ProbeOutcome::Pass`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` when this outcome fails a run.
    ///
    /// Inconclusive outcomes fail only in strict mode.
    #[must_use]
    pub const fn fails_run(&self, strict: bool) -> bool {
        match self {
            Self::Pass => false,
            Self::Fail(_) => true,
            Self::Inconclusive(_) => strict,
        }
    }

    /// Short status label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail(_) => "FAIL",
            Self::Inconclusive(_) => "inconclusive",
        }
    }
}

impl From<Result<(), FailureReason>> for ProbeOutcome {
    fn from(result: Result<(), FailureReason>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(reason) => Self::Fail(reason),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str(self.label()),
            Self::Fail(reason) => write!(f, "{}: {reason}", self.label()),
            Self::Inconclusive(reason) => write!(f, "{}: {reason}", self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconclusive_fails_only_in_strict_mode() {
        let outcome = ProbeOutcome::Inconclusive(InconclusiveReason::NeverBlocked {
            written: 8,
            ceiling: 8,
        });
        assert!(!outcome.fails_run(false));
        assert!(outcome.fails_run(true));
        assert!(!outcome.is_pass());
    }

    #[test]
    fn result_conversion_maps_errors_to_fail() {
        assert!(ProbeOutcome::from(Ok(())).is_pass());
        let outcome = ProbeOutcome::from(Err(FailureReason::CrossTalk { bytes: 3 }));
        assert!(outcome.fails_run(false));
    }

    #[test]
    fn display_includes_reason() {
        let outcome = ProbeOutcome::Fail(FailureReason::Mismatch {
            offset: 5,
            expected: 5,
            actual: 0,
        });
        assert_eq!(
            outcome.to_string(),
            "FAIL: byte mismatch at offset 5: expected 0x05, read 0x00"
        );
    }

    #[test]
    fn loopback_case_prefixes_the_combination() {
        let reason = FailureReason::InLoopbackCase {
            length: 128,
            write_chunk: 9,
            read_chunk: 65,
            source: Box::new(FailureReason::ShortRead {
                offset: 65,
                requested: 63,
                read: 10,
            }),
        };
        let text = reason.to_string();
        assert!(text.starts_with("loopback of 128 bytes (write chunk 9, read chunk 65)"));
        assert!(text.ends_with("requested 63 bytes, device returned 10"));
    }
}
