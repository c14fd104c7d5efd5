#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` owns the diagnostic plumbing of the LPC conformance harness: the
//! per-category verbosity model ([`LogFlag`], [`FlagLevels`],
//! [`VerbosityConfig`]) and the tracing subscriber that renders events to
//! stderr ([`init_tracing`]).
//!
//! # Design
//!
//! Harness code emits standard `tracing` events under `lpc::` targets, usually
//! through the [`trace_probe!`], [`trace_transfer!`], [`trace_device!`],
//! [`trace_pacing!`], and [`trace_summary!`] macros. The subscriber installed by
//! [`init_tracing`] consults the [`VerbosityConfig`] through a
//! [`VerbosityFilter`] so that `-v` counts and `--debug` tokens decide what is
//! printed. Warnings and errors are always printed.
//!
//! # Examples
//!
//! ```
//! use logging::{LogFlag, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_flag("transfer2").unwrap();
//!
//! assert!(config.allows(LogFlag::Probe, 1));
//! assert!(config.allows(LogFlag::Transfer, 2));
//! assert!(!config.allows(LogFlag::Device, 1));
//! ```

mod config;
mod levels;
mod tracing_bridge;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{FlagLevels, LogFlag};
pub use tracing_bridge::{VerbosityFilter, init_tracing, init_tracing_from_env, verbosity_layer};
pub use tracing_subscriber::util::TryInitError;
