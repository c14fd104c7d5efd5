//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the harness verbosity system.
//!
//! Events are routed to a formatting layer writing to stderr. A per-layer
//! [`VerbosityFilter`] maps each event's target to a [`LogFlag`] and its level
//! to a verbosity level, and only lets through events the current
//! [`VerbosityConfig`] asks for.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! init_tracing(config).ok();
//!
//! tracing::info!(target: "lpc::probe", "probe started");
//! tracing::debug!(target: "lpc::transfer", "wrote 64 bytes");
//! ```

use std::io;

use super::config::VerbosityConfig;
use super::levels::LogFlag;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Filter, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Per-layer filter applying a [`VerbosityConfig`] to tracing events.
///
/// Warnings and errors always pass. Events from targets outside the `lpc::`
/// namespace pass only at those two levels.
#[derive(Clone, Debug)]
pub struct VerbosityFilter {
    config: VerbosityConfig,
}

impl VerbosityFilter {
    /// Create a new filter for the given configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { config }
    }

    /// Returns `true` when an event with this target and level is recorded.
    #[must_use]
    pub fn is_enabled(&self, target: &str, level: &Level) -> bool {
        let required = Self::level_to_verbosity_level(level);
        if required == 0 {
            return true;
        }
        LogFlag::from_target(target).is_some_and(|flag| self.config.allows(flag, required))
    }

    /// Map a tracing level to a verbosity level.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
            _ => 0,
        }
    }
}

impl<S> Filter<S> for VerbosityFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.is_enabled(meta.target(), meta.level())
    }
}

/// Builds the formatting layer used by the harness, writing to `make_writer`.
pub fn verbosity_layer<S, W>(config: VerbosityConfig, make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(make_writer)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .with_filter(VerbosityFilter::new(config))
}

/// Initialize tracing with the harness verbosity configuration.
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(config: VerbosityConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(verbosity_layer(config, io::stderr))
        .try_init()
}

/// Initialize tracing, letting `RUST_LOG` take precedence over `config`.
pub fn init_tracing_from_env(config: VerbosityConfig) -> Result<(), TryInitError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_filter(filter),
            )
            .try_init(),
        Err(_) => init_tracing(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf-8")
        }
    }

    fn capture(config: VerbosityConfig, emit: impl FnOnce()) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber =
            tracing_subscriber::registry().with(verbosity_layer(config, move || writer.clone()));
        tracing::subscriber::with_default(subscriber, emit);
        buffer.contents()
    }

    #[test]
    fn test_level_to_verbosity_level() {
        assert_eq!(VerbosityFilter::level_to_verbosity_level(&Level::ERROR), 0);
        assert_eq!(VerbosityFilter::level_to_verbosity_level(&Level::WARN), 0);
        assert_eq!(VerbosityFilter::level_to_verbosity_level(&Level::INFO), 1);
        assert_eq!(VerbosityFilter::level_to_verbosity_level(&Level::DEBUG), 2);
        assert_eq!(VerbosityFilter::level_to_verbosity_level(&Level::TRACE), 3);
    }

    #[test]
    fn warnings_pass_at_level_zero() {
        let filter = VerbosityFilter::new(VerbosityConfig::from_verbose_level(0));
        assert!(filter.is_enabled("lpc::probe", &Level::WARN));
        assert!(filter.is_enabled("some::crate", &Level::ERROR));
        assert!(!filter.is_enabled("lpc::probe", &Level::INFO));
    }

    #[test]
    fn foreign_targets_are_limited_to_warnings() {
        let filter = VerbosityFilter::new(VerbosityConfig::from_verbose_level(4));
        assert!(!filter.is_enabled("some::crate", &Level::INFO));
    }

    #[test]
    fn captured_output_respects_category_levels() {
        let output = capture(VerbosityConfig::from_verbose_level(1), || {
            tracing::info!(target: "lpc::probe", "probe visible");
            tracing::debug!(target: "lpc::probe", "probe detail hidden");
            tracing::debug!(target: "lpc::transfer", "transfer hidden");
            tracing::warn!(target: "lpc::transfer", "transfer warning visible");
        });

        assert!(output.contains("probe visible"));
        assert!(output.contains("transfer warning visible"));
        assert!(!output.contains("hidden"));
    }

    #[test]
    fn debug_tokens_open_single_categories() {
        let mut config = VerbosityConfig::default();
        config.apply_flag("device2").expect("valid token");

        let output = capture(config, || {
            tracing::debug!(target: "lpc::device", "opened handle");
            tracing::debug!(target: "lpc::transfer", "chunk done");
        });

        assert!(output.contains("opened handle"));
        assert!(!output.contains("chunk done"));
    }
}
