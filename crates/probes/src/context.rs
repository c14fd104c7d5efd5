use device::StreamPair;

use crate::pacing::Pacer;
use crate::settings::ProbeSettings;

/// Everything a probe needs: the device pair, its settings, and the pacer.
#[derive(Clone, Copy)]
pub struct ProbeContext<'a> {
    /// Input and output device nodes.
    pub streams: &'a StreamPair,
    /// Probe constants.
    pub settings: &'a ProbeSettings,
    /// Pacing strategy for probe sub-steps.
    pub pacer: &'a dyn Pacer,
}

impl<'a> ProbeContext<'a> {
    /// Bundles the probe inputs.
    pub const fn new(
        streams: &'a StreamPair,
        settings: &'a ProbeSettings,
        pacer: &'a dyn Pacer,
    ) -> Self {
        Self {
            streams,
            settings,
            pacer,
        }
    }

    /// Pauses before a probe sub-step; pacing problems never fail a probe.
    pub(crate) fn checkpoint(&self, label: &str) {
        if let Err(err) = self.pacer.checkpoint(label) {
            tracing::warn!(target: "lpc::pacing", "pacing prompt for {label} failed: {err}");
        }
    }
}

impl std::fmt::Debug for ProbeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeContext")
            .field("streams", self.streams)
            .field("settings", self.settings)
            .finish_non_exhaustive()
    }
}
