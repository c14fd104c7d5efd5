//! Plain-text rendering of probe listings and run summaries.

use std::io::{self, Write};

use probes::{ProbeDescriptor, ProbeOutcome, RunSummary};

const NAME_WIDTH: usize = 26;

/// Writes one line per probe: name, default state, and summary.
pub(crate) fn render_probe_list<W: Write>(
    writer: &mut W,
    probes: &[ProbeDescriptor],
) -> io::Result<()> {
    for probe in probes {
        let state = if probe.enabled { "" } else { " (disabled)" };
        writeln!(
            writer,
            "{:<NAME_WIDTH$}{}{state}",
            probe.name, probe.summary
        )?;
    }
    Ok(())
}

/// Writes one line per report followed by the totals.
pub(crate) fn render_summary<W: Write>(
    writer: &mut W,
    summary: &RunSummary,
    strict: bool,
) -> io::Result<()> {
    for report in &summary.reports {
        write!(
            writer,
            "{:<NAME_WIDTH$}{:<14}{:>9.3}s",
            report.name,
            report.outcome.label(),
            report.elapsed.as_secs_f64()
        )?;
        match &report.outcome {
            ProbeOutcome::Pass => writeln!(writer)?,
            ProbeOutcome::Fail(reason) => writeln!(writer, "  {}", chain(reason))?,
            ProbeOutcome::Inconclusive(reason) => writeln!(writer, "  {reason}")?,
        }
    }

    writeln!(
        writer,
        "{} probes: {} passed, {} failed, {} inconclusive{}",
        summary.reports.len(),
        summary.passed(),
        summary.failed(),
        summary.inconclusive(),
        if strict && summary.inconclusive() > 0 {
            " (strict: inconclusive counts as failure)"
        } else {
            ""
        }
    )
}

// Display of the failure followed by every source that adds text.
fn chain(reason: &dyn std::error::Error) -> String {
    let mut rendered = reason.to_string();
    let mut source = reason.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use probes::{FailureReason, InconclusiveReason, ProbeReport, default_probes};
    use std::time::Duration;

    fn render(summary: &RunSummary, strict: bool) -> String {
        let mut out = Vec::new();
        render_summary(&mut out, summary, strict).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn list_marks_disabled_probes() {
        let mut out = Vec::new();
        render_probe_list(&mut out, default_probes()).expect("render");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), default_probes().len());
        assert!(text.lines().any(|l| l.starts_with("loopback ") && !l.contains("(disabled)")));
        assert!(text.lines().any(|l| l.starts_with("streams-open ") && l.ends_with("(disabled)")));
    }

    #[test]
    fn summary_lists_each_probe_and_totals() {
        let summary = RunSummary {
            reports: vec![
                ProbeReport {
                    name: "isolation",
                    outcome: ProbeOutcome::Fail(FailureReason::CrossTalk { bytes: 1024 }),
                    elapsed: Duration::from_millis(3),
                },
                ProbeReport {
                    name: "large-writes-block",
                    outcome: ProbeOutcome::Inconclusive(InconclusiveReason::NeverBlocked {
                        written: 64,
                        ceiling: 64,
                    }),
                    elapsed: Duration::from_millis(1),
                },
            ],
        };

        let text = render(&summary, false);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("isolation"));
        assert!(lines[0].contains("FAIL"));
        assert!(lines[0].contains("1024 bytes appeared on the input stream"));
        assert!(lines[1].contains("inconclusive"));
        assert_eq!(lines[2], "2 probes: 0 passed, 1 failed, 1 inconclusive");

        assert!(render(&summary, true).contains("(strict: inconclusive counts as failure)"));
    }

    #[test]
    fn nested_loopback_failure_is_rendered_once() {
        let reason = FailureReason::InLoopbackCase {
            length: 64,
            write_chunk: 1,
            read_chunk: 1,
            source: Box::new(FailureReason::ShortRead {
                offset: 10,
                requested: 1,
                read: 0,
            }),
        };
        let rendered = chain(&reason);
        assert_eq!(rendered.matches("short read").count(), 1, "{rendered}");
    }
}
