use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use logging::trace_device;

use crate::error::{DeviceError, Operation};
use crate::options::DeviceOptions;

/// Result of a single non-blocking write call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteAttempt {
    /// The call transferred this many bytes.
    Written(usize),
    /// The call reported `EAGAIN`/`EWOULDBLOCK`.
    WouldBlock,
}

/// One open direction of the device.
///
/// A handle is owned by exactly one task and closed when dropped or passed
/// to [`close`](Self::close).
#[derive(Debug)]
pub struct DeviceHandle {
    file: File,
    path: PathBuf,
    options: DeviceOptions,
}

impl DeviceHandle {
    pub(crate) const fn new(file: File, path: PathBuf, options: DeviceOptions) -> Self {
        Self {
            file,
            path,
            options,
        }
    }

    /// Path the handle was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flags the handle was opened with.
    #[must_use]
    pub const fn options(&self) -> DeviceOptions {
        self.options
    }

    /// Issues one `read` call. `Ok(0)` means end-of-stream.
    pub fn read_once(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        loop {
            match self.file.read(buf) {
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(self.error(Operation::Read, err)),
            }
        }
    }

    /// Reads until `buf` is full or the stream ends, returning the byte count.
    ///
    /// A count below `buf.len()` means end-of-stream was reached first.
    pub fn read_slice(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read_once(&mut buf[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(filled)
    }

    /// Writes until all of `buf` is transferred or the device accepts no more,
    /// returning the byte count.
    pub fn write_slice(&mut self, buf: &[u8]) -> Result<usize, DeviceError> {
        let mut written = 0;
        while written < buf.len() {
            match self.file.write(&buf[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(self.error(Operation::Write, err)),
            }
        }
        Ok(written)
    }

    /// Issues one `write` call, reporting would-block separately from errors.
    pub fn try_write(&mut self, buf: &[u8]) -> Result<WriteAttempt, DeviceError> {
        loop {
            match self.file.write(buf) {
                Ok(n) => return Ok(WriteAttempt::Written(n)),
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                    return Ok(WriteAttempt::WouldBlock);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(self.error(Operation::Write, err)),
            }
        }
    }

    /// Reads with a `buffer_len` buffer until a read returns zero bytes,
    /// returning the number of bytes discarded.
    pub fn drain(&mut self, buffer_len: usize) -> Result<u64, DeviceError> {
        let mut buffer = vec![0u8; buffer_len.max(1)];
        let mut discarded = 0u64;
        loop {
            match self.read_once(&mut buffer)? {
                0 => break,
                n => discarded += n as u64,
            }
        }
        trace_device!("drained {discarded} bytes from {}", self.path.display());
        Ok(discarded)
    }

    /// Flushes written data to the device with `fsync`.
    pub fn sync(&mut self) -> Result<(), DeviceError> {
        self.file
            .sync_all()
            .map_err(|err| self.error(Operation::Sync, err))
    }

    /// Closes the handle.
    pub fn close(self) {
        trace_device!("closing {}", self.path.display());
        drop(self.file);
    }

    fn error(&self, operation: Operation, source: io::Error) -> DeviceError {
        DeviceError::io(&self.path, operation, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_slice_stops_at_end_of_stream() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input");
        fs::write(&path, b"abcde").expect("write fixture");

        let mut handle = DeviceOptions::read().open(&path).expect("open");
        let mut buf = [0u8; 8];
        assert_eq!(handle.read_slice(&mut buf).expect("read"), 5);
        assert_eq!(&buf[..5], b"abcde");
        assert_eq!(handle.read_slice(&mut buf).expect("read"), 0);
    }

    #[test]
    fn write_slice_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output");
        fs::write(&path, b"head-").expect("write fixture");

        let mut handle = DeviceOptions::append().open(&path).expect("open");
        assert_eq!(handle.write_slice(b"tail").expect("write"), 4);
        handle.close();

        assert_eq!(fs::read(&path).expect("read back"), b"head-tail");
    }

    #[test]
    fn drain_counts_discarded_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input");
        fs::write(&path, vec![7u8; 2500]).expect("write fixture");

        let mut handle = DeviceOptions::read().open(&path).expect("open");
        assert_eq!(handle.drain(1024).expect("drain"), 2500);
        assert_eq!(handle.read_once(&mut [0u8; 16]).expect("read"), 0);
    }

    #[test]
    fn writing_a_read_handle_reports_write_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input");
        fs::write(&path, b"x").expect("write fixture");

        let mut handle = DeviceOptions::read().open(&path).expect("open");
        let err = handle.write_slice(b"nope").expect_err("read-only handle");
        assert!(matches!(
            err,
            DeviceError::Io {
                operation: Operation::Write,
                ..
            }
        ));
    }
}
