//! Declarative probe list.

use crate::blocking::{bulk_write_completes, large_writes_eventually_block, small_writes_never_block};
use crate::context::ProbeContext;
use crate::isolation::verify_directional_isolation;
use crate::outcome::ProbeOutcome;
use crate::parameters::write_parameter_messages;
use crate::reconnect::verify_message_alignment;
use crate::smoke::{
    streams_can_be_opened, streams_can_be_reopened, write_ascending_pattern,
    write_ascending_pattern_in_chunks,
};
use crate::transfer::loopback_matrix;

/// Entry point shared by every probe.
pub type ProbeFn = fn(&ProbeContext<'_>) -> ProbeOutcome;

/// A named probe and whether it runs without an explicit selection.
#[derive(Clone, Copy, Debug)]
pub struct ProbeDescriptor {
    /// Stable name used by `--probe` and `--skip`.
    pub name: &'static str,
    /// One-line description for `--list`.
    pub summary: &'static str,
    /// Probe body.
    pub run: ProbeFn,
    /// Runs by default.
    pub enabled: bool,
}

const PROBES: &[ProbeDescriptor] = &[
    ProbeDescriptor {
        name: "parameter-messages",
        summary: "emit a burst of 12-byte parameter records through a non-blocking handle",
        run: parameter_messages,
        enabled: true,
    },
    ProbeDescriptor {
        name: "ascending-pattern-chunks",
        summary: "write the ascending pattern in paced chunks",
        run: ascending_pattern_chunks,
        enabled: true,
    },
    ProbeDescriptor {
        name: "isolation",
        summary: "output traffic never appears on the input stream",
        run: isolation,
        enabled: true,
    },
    ProbeDescriptor {
        name: "small-writes",
        summary: "small non-blocking writes are accepted in full",
        run: small_writes,
        enabled: true,
    },
    ProbeDescriptor {
        name: "bulk-write",
        summary: "one large blocking write completes",
        run: bulk_write,
        enabled: true,
    },
    ProbeDescriptor {
        name: "large-writes-block",
        summary: "sustained non-blocking writes eventually report would-block",
        run: large_writes_block,
        enabled: true,
    },
    ProbeDescriptor {
        name: "small-writes-after-backpressure",
        summary: "small non-blocking writes are accepted again after the device pushed back",
        run: small_writes,
        enabled: true,
    },
    ProbeDescriptor {
        name: "loopback",
        summary: "chunked loop-back preserves every byte for all chunk plans",
        run: loopback,
        enabled: true,
    },
    ProbeDescriptor {
        name: "reconnect-alignment",
        summary: "reads after reconnecting start at a message boundary",
        run: reconnect_alignment,
        enabled: true,
    },
    ProbeDescriptor {
        name: "streams-open",
        summary: "both device nodes can be opened and closed",
        run: streams_open,
        enabled: false,
    },
    ProbeDescriptor {
        name: "streams-reopen",
        summary: "both device nodes survive repeated open and close",
        run: streams_reopen,
        enabled: false,
    },
    ProbeDescriptor {
        name: "ascending-pattern",
        summary: "write a short ascending pattern in one call",
        run: ascending_pattern,
        enabled: false,
    },
];

/// Every probe in execution order.
#[must_use]
pub const fn default_probes() -> &'static [ProbeDescriptor] {
    PROBES
}

/// Looks up a probe by name.
#[must_use]
pub fn find_probe(name: &str) -> Option<&'static ProbeDescriptor> {
    PROBES.iter().find(|probe| probe.name == name)
}

fn parameter_messages(cx: &ProbeContext<'_>) -> ProbeOutcome {
    write_parameter_messages(cx.streams, &cx.settings.parameter_messages)
}

fn ascending_pattern_chunks(cx: &ProbeContext<'_>) -> ProbeOutcome {
    write_ascending_pattern_in_chunks(cx.streams, &cx.settings.pattern_chunks)
}

fn isolation(cx: &ProbeContext<'_>) -> ProbeOutcome {
    verify_directional_isolation(cx.streams, cx.settings.isolation_buffer, cx.pacer)
}

fn small_writes(cx: &ProbeContext<'_>) -> ProbeOutcome {
    small_writes_never_block(cx.streams, &cx.settings.small_write_sizes)
}

fn bulk_write(cx: &ProbeContext<'_>) -> ProbeOutcome {
    bulk_write_completes(cx.streams, cx.settings.large_write_size)
}

fn large_writes_block(cx: &ProbeContext<'_>) -> ProbeOutcome {
    large_writes_eventually_block(
        cx.streams,
        cx.settings.large_write_size,
        cx.settings.write_ceiling,
    )
}

fn loopback(cx: &ProbeContext<'_>) -> ProbeOutcome {
    loopback_matrix(
        cx.streams,
        &cx.settings.message_lengths,
        &cx.settings.chunk_sizes,
    )
}

fn reconnect_alignment(cx: &ProbeContext<'_>) -> ProbeOutcome {
    verify_message_alignment(cx.streams, &cx.settings.reconnect)
}

fn streams_open(cx: &ProbeContext<'_>) -> ProbeOutcome {
    streams_can_be_opened(cx.streams)
}

fn streams_reopen(cx: &ProbeContext<'_>) -> ProbeOutcome {
    streams_can_be_reopened(cx.streams, cx.settings.reopen_iterations)
}

fn ascending_pattern(cx: &ProbeContext<'_>) -> ProbeOutcome {
    write_ascending_pattern(cx.streams, cx.settings.ascending_pattern_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = default_probes().iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), default_probes().len());
    }

    #[test]
    fn enabled_probes_run_in_harness_order() {
        let enabled: Vec<_> = default_probes()
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.name)
            .collect();
        assert_eq!(
            enabled,
            [
                "parameter-messages",
                "ascending-pattern-chunks",
                "isolation",
                "small-writes",
                "bulk-write",
                "large-writes-block",
                "small-writes-after-backpressure",
                "loopback",
                "reconnect-alignment",
            ]
        );
    }

    #[test]
    fn lookup_by_name() {
        assert!(find_probe("loopback").is_some());
        assert!(find_probe("streams-open").is_some_and(|p| !p.enabled));
        assert!(find_probe("nonexistent").is_none());
    }
}
