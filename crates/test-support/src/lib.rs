//! Shared helpers for tests that exercise the harness against ordinary OS
//! objects: FIFOs stand in for a connected stream pair, regular files for a
//! replayable input, and `/dev/null` for a sink that never pushes back.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use tempfile::TempDir;

/// Sink that accepts every write without backpressure.
pub const DEV_NULL: &str = "/dev/null";

/// Capacity probe write size; equal to `PIPE_BUF` on Linux so FIFO writes
/// are all-or-nothing.
const FILL_CHUNK: usize = 4096;

/// Creates a scratch directory for one test.
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("create scratch dir")
}

/// Creates a FIFO at `dir/name` and returns its path.
pub fn fifo_in(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    mkfifo(&path).expect("mkfifo");
    path
}

/// Creates a regular file at `dir/name` holding `contents`.
pub fn file_in(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture file");
    path
}

#[cfg(all(
    unix,
    not(any(
        target_os = "ios",
        target_os = "macos",
        target_os = "tvos",
        target_os = "watchos"
    ))
))]
/// Creates a FIFO with mode `0600`.
pub fn mkfifo(path: &Path) -> io::Result<()> {
    use rustix::fs::{CWD, FileType, Mode, makedev, mknodat};

    let mode = Mode::RUSR | Mode::WUSR;
    mknodat(CWD, path, FileType::Fifo, mode, makedev(0, 0)).map_err(io::Error::from)
}

#[cfg(all(
    unix,
    any(
        target_os = "ios",
        target_os = "macos",
        target_os = "tvos",
        target_os = "watchos"
    )
))]
/// Creates a FIFO with mode `0600`.
#[allow(unsafe_code)]
pub fn mkfifo(path: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_c = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains interior NUL"))?;
    // SAFETY: `path_c` is a valid NUL-terminated string for the duration of the call.
    let result = unsafe { libc::mkfifo(path_c.as_ptr(), 0o600) };
    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Holds a FIFO's read end open without consuming data.
///
/// While a keeper exists, writers never see `EPIPE` between reader
/// reconnects, non-blocking writers can open the FIFO, and buffered data
/// survives a reader closing its handle.
#[derive(Debug)]
pub struct FifoKeeper {
    _file: File,
}

impl FifoKeeper {
    /// Opens the read end of `path` with `O_NONBLOCK` (never waits for a writer).
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = nonblocking(OpenOptions::new().read(true)).open(path)?;
        Ok(Self { _file: file })
    }
}

/// Writes into `path` until it reports would-block and returns the byte count.
///
/// The FIFO must have a reader (see [`FifoKeeper`]) or the open fails with
/// `ENXIO`. The returned handle keeps the write end open.
pub fn fill_fifo(path: &Path) -> io::Result<(File, usize)> {
    let mut file = nonblocking(OpenOptions::new().write(true)).open(path)?;
    let chunk = [0xA5u8; FILL_CHUNK];
    let mut total = 0;
    loop {
        match file.write(&chunk) {
            Ok(n) => total += n,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => return Ok((file, total)),
            Err(err) => return Err(err),
        }
    }
}

#[cfg(unix)]
fn nonblocking(options: &mut OpenOptions) -> &mut OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;

    options.custom_flags(libc::O_NONBLOCK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::FileTypeExt;

    #[test]
    fn fifo_in_creates_a_fifo() {
        let dir = scratch_dir();
        let path = fifo_in(&dir, "bus");
        let meta = std::fs::metadata(&path).expect("metadata");
        assert!(meta.file_type().is_fifo());
    }

    #[test]
    fn fill_fifo_stops_at_capacity() {
        let dir = scratch_dir();
        let path = fifo_in(&dir, "bus");
        let _keeper = FifoKeeper::open(&path).expect("keeper");

        let (_writer, filled) = fill_fifo(&path).expect("fill");
        assert!(filled >= FILL_CHUNK, "pipe accepted only {filled} bytes");
        assert_eq!(filled % FILL_CHUNK, 0);
    }
}
