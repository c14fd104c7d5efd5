#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `probes` checks that a pair of LPC bus stream devices honors the stream
//! contract user-space software relies on: ordered loss-free delivery for any
//! writer/reader chunking, backpressure on bulk writes and none on small ones,
//! message alignment across reader reconnects, and isolation between the two
//! directions.
//!
//! # Design
//!
//! Each probe is a plain function over a [`device::StreamPair`] that returns a
//! [`ProbeOutcome`]. Contract violations are [`FailureReason`] values, never
//! panics, so one failing probe does not hide the others. The
//! [`registry`](default_probes) lists every probe with its name and default
//! state, and [`ProbeRunner`] runs a [`Selection`] of them with a [`Pacer`]
//! checkpoint before each one.
//!
//! Writer and reader tasks run on scoped threads with independent handles.
//! Their only shared state is the device under test.
//!
//! # Examples
//!
//! ```no_run
//! use device::StreamPair;
//! use probes::{NoPacing, ProbeContext, ProbeRunner, ProbeSettings, Selection};
//!
//! let streams = StreamPair::new("/dev/lpc_in", "/dev/lpc_out");
//! let settings = ProbeSettings::default();
//! let runner = ProbeRunner::from_selection(&Selection::default()).unwrap();
//! let summary = runner.run(&ProbeContext::new(&streams, &settings, &NoPacing));
//! assert!(summary.is_success(false));
//! ```

mod blocking;
mod context;
mod isolation;
mod outcome;
mod pacing;
mod parameters;
mod pattern;
mod reconnect;
mod registry;
mod runner;
mod settings;
mod smoke;
mod transfer;

pub use blocking::{bulk_write_completes, large_writes_eventually_block, small_writes_never_block};
pub use context::ProbeContext;
pub use isolation::verify_directional_isolation;
pub use outcome::{FailureReason, InconclusiveReason, ProbeOutcome};
pub use pacing::{InteractivePacer, NoPacing, Pacer};
pub use parameters::{
    PARAMETER_MESSAGE_LEN, PARAMETER_MESSAGE_TYPE, ParameterMessage, write_parameter_messages,
};
pub use pattern::{ByteSequence, ascending_pattern};
pub use reconnect::verify_message_alignment;
pub use registry::{ProbeDescriptor, ProbeFn, default_probes, find_probe};
pub use runner::{ProbeReport, ProbeRunner, RunSummary, Selection, SelectionError};
pub use settings::{
    INTERESTING_CHUNK_SIZES, MESSAGE_LENGTHS, ONE_GIB, ONE_MIB, ParameterMessageSettings,
    PatternChunkSettings, ProbeSettings, ReconnectSettings, SMALL_WRITE_SIZES,
};
pub use smoke::{
    streams_can_be_opened, streams_can_be_reopened, write_ascending_pattern,
    write_ascending_pattern_in_chunks,
};
pub use transfer::{ChunkPlan, loopback_matrix, verify_loopback};
