//! Probe selection and execution.

use std::time::{Duration, Instant};

use logging::{trace_probe, trace_summary};

use crate::context::ProbeContext;
use crate::outcome::ProbeOutcome;
use crate::registry::{ProbeDescriptor, default_probes, find_probe};

/// Error raised when a selection names a probe that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// No probe carries this name.
    #[error("unknown probe '{0}' (use --list to see available probes)")]
    UnknownProbe(String),
}

/// Which probes to run.
///
/// An empty `only` list means every enabled probe. Names in `skip` are
/// removed afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    only: Vec<String>,
    skip: Vec<String>,
}

impl Selection {
    /// Runs only the named probes, in registry order.
    #[must_use]
    pub fn with_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(names.into_iter().map(Into::into));
        self
    }

    /// Excludes the named probes.
    #[must_use]
    pub fn with_skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(names.into_iter().map(Into::into));
        self
    }

    /// Resolves the selection against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownProbe`] for the first name that
    /// matches no probe.
    pub fn resolve(&self) -> Result<Vec<&'static ProbeDescriptor>, SelectionError> {
        for name in self.only.iter().chain(&self.skip) {
            if find_probe(name).is_none() {
                return Err(SelectionError::UnknownProbe(name.clone()));
            }
        }

        Ok(default_probes()
            .iter()
            .filter(|probe| {
                if self.only.is_empty() {
                    probe.enabled
                } else {
                    self.only.iter().any(|name| name == probe.name)
                }
            })
            .filter(|probe| !self.skip.iter().any(|name| name == probe.name))
            .collect())
    }
}

/// Outcome of one probe within a run.
#[derive(Debug)]
pub struct ProbeReport {
    /// Probe name.
    pub name: &'static str,
    /// What the probe concluded.
    pub outcome: ProbeOutcome,
    /// Wall-clock duration.
    pub elapsed: Duration,
}

/// Reports of a complete run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// One report per executed probe, in execution order.
    pub reports: Vec<ProbeReport>,
}

impl RunSummary {
    /// Number of passing probes.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|outcome| matches!(outcome, ProbeOutcome::Pass))
    }

    /// Number of failing probes.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, ProbeOutcome::Fail(_)))
    }

    /// Number of inconclusive probes.
    #[must_use]
    pub fn inconclusive(&self) -> usize {
        self.count(|outcome| matches!(outcome, ProbeOutcome::Inconclusive(_)))
    }

    /// Returns `true` when no report fails the run.
    #[must_use]
    pub fn is_success(&self, strict: bool) -> bool {
        !self
            .reports
            .iter()
            .any(|report| report.outcome.fails_run(strict))
    }

    fn count(&self, predicate: impl Fn(&ProbeOutcome) -> bool) -> usize {
        self.reports
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Runs a resolved list of probes against one device pair.
#[derive(Debug)]
pub struct ProbeRunner {
    probes: Vec<&'static ProbeDescriptor>,
}

impl ProbeRunner {
    /// Runner for the given probes.
    #[must_use]
    pub const fn new(probes: Vec<&'static ProbeDescriptor>) -> Self {
        Self { probes }
    }

    /// Runner for a selection.
    ///
    /// # Errors
    ///
    /// Propagates [`Selection::resolve`] failures.
    pub fn from_selection(selection: &Selection) -> Result<Self, SelectionError> {
        selection.resolve().map(Self::new)
    }

    /// Probes this runner executes.
    #[must_use]
    pub fn probes(&self) -> &[&'static ProbeDescriptor] {
        &self.probes
    }

    /// Runs every probe; a failure never stops the run.
    pub fn run(&self, cx: &ProbeContext<'_>) -> RunSummary {
        let mut summary = RunSummary::default();

        for probe in &self.probes {
            cx.checkpoint(probe.name);
            trace_probe!("running {}", probe.name);

            let started = Instant::now();
            let outcome = (probe.run)(cx);
            let elapsed = started.elapsed();

            match &outcome {
                ProbeOutcome::Pass => {
                    trace_probe!("{} passed in {:.3}s", probe.name, elapsed.as_secs_f64());
                }
                ProbeOutcome::Fail(reason) => {
                    tracing::error!(target: "lpc::probe", "{} failed: {reason}", probe.name);
                }
                ProbeOutcome::Inconclusive(reason) => {
                    tracing::warn!(target: "lpc::probe", "{} inconclusive: {reason}", probe.name);
                }
            }

            summary.reports.push(ProbeReport {
                name: probe.name,
                outcome,
                elapsed,
            });
        }

        trace_summary!(
            "{} passed, {} failed, {} inconclusive",
            summary.passed(),
            summary.failed(),
            summary.inconclusive()
        );
        summary
    }
}
