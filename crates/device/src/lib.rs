#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `device` wraps the two device nodes of the LPC bus (the input stream and
//! the output stream) in handles that know how they were opened.
//!
//! # Design
//!
//! [`DeviceOptions`] selects the direction and the `O_NONBLOCK`/`O_SYNC`
//! flags; [`StreamPair`] holds both paths and opens them in the modes the
//! probes use. A [`DeviceHandle`] offers two families of primitives:
//!
//! - slice transfers ([`DeviceHandle::read_slice`],
//!   [`DeviceHandle::write_slice`]) that repeat the system call until the
//!   slice is complete or the stream ends, matching buffered-stream semantics;
//! - single calls ([`DeviceHandle::read_once`], [`DeviceHandle::try_write`])
//!   for probes that classify one system call, where would-block is reported as
//!   [`WriteAttempt::WouldBlock`] rather than as an error.
//!
//! # Errors
//!
//! Every failure is a [`DeviceError`] carrying the node path and the failed
//! operation. `EINTR` is retried internally.

mod error;
mod handle;
mod options;
mod streams;

pub use error::{DeviceError, Operation};
pub use handle::{DeviceHandle, WriteAttempt};
pub use options::{AccessMode, DeviceOptions};
pub use streams::StreamPair;
