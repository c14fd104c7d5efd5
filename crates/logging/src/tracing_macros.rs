//! crates/logging/src/tracing_macros.rs
//! Convenience macros for harness tracing.
//!
//! These macros wrap the standard tracing macros with the target owned by
//! each [`LogFlag`](crate::LogFlag).

/// Emit a probe lifecycle trace.
///
/// # Example
/// ```ignore
/// trace_probe!("running {}", name);
/// ```
#[macro_export]
macro_rules! trace_probe {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "lpc::probe", $($arg)*);
    };
}

/// Emit a transfer progress trace.
///
/// # Example
/// ```ignore
/// trace_transfer!("writer sent {} of {} bytes", done, total);
/// ```
#[macro_export]
macro_rules! trace_transfer {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lpc::transfer", $($arg)*);
    };
}

/// Emit a device handle trace.
///
/// # Example
/// ```ignore
/// trace_device!("opened {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_device {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lpc::device", $($arg)*);
    };
}

/// Emit a pacing trace.
#[macro_export]
macro_rules! trace_pacing {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lpc::pacing", $($arg)*);
    };
}

/// Emit a run summary trace.
#[macro_export]
macro_rules! trace_summary {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "lpc::summary", $($arg)*);
    };
}
