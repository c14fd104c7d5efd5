//! Operator pacing between probe steps.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use logging::trace_pacing;

/// Decides whether the harness pauses before a probe step.
pub trait Pacer: Send + Sync {
    /// Called before the step named `label` starts.
    fn checkpoint(&self, label: &str) -> io::Result<()>;
}

/// Pacer for unattended runs: never pauses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn checkpoint(&self, label: &str) -> io::Result<()> {
        trace_pacing!("checkpoint {label}");
        Ok(())
    }
}

/// Pacer that prints `--> label` and waits for one line of input.
///
/// End of input lets every later step proceed immediately.
pub struct InteractivePacer<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> InteractivePacer<R, W> {
    /// Prompts on `output` and waits on `input`.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }
}

impl<R, W> fmt::Debug for InteractivePacer<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractivePacer").finish_non_exhaustive()
    }
}

impl<R, W> Pacer for InteractivePacer<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn checkpoint(&self, label: &str) -> io::Result<()> {
        let mut guard = self
            .io
            .lock()
            .map_err(|_| io::Error::other("pacer lock poisoned"))?;
        let (input, output) = &mut *guard;

        write!(output, "\n--> {label}")?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        trace_pacing!("checkpoint {label} released (eof={})", read == 0);
        Ok(())
    }
}
