use std::path::{Path, PathBuf};

use crate::error::DeviceError;
use crate::handle::DeviceHandle;
use crate::options::DeviceOptions;

/// Paths of the two device directions under test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamPair {
    input: PathBuf,
    output: PathBuf,
}

impl StreamPair {
    /// Creates a pair from the input-direction and output-direction nodes.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Input-direction node (the harness reads from it).
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Output-direction node (the harness writes to it).
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Opens the input direction for blocking reads.
    pub fn open_input(&self) -> Result<DeviceHandle, DeviceError> {
        DeviceOptions::read().open(&self.input)
    }

    /// Opens the output direction for blocking appends.
    pub fn open_output(&self) -> Result<DeviceHandle, DeviceError> {
        DeviceOptions::append().open(&self.output)
    }

    /// Opens the output direction with `O_NONBLOCK | O_SYNC`.
    pub fn open_output_nonblocking(&self) -> Result<DeviceHandle, DeviceError> {
        DeviceOptions::append()
            .nonblocking(true)
            .synchronous(true)
            .open(&self.output)
    }
}
