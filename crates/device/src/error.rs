use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::options::AccessMode;

/// Device operation that produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `read(2)`.
    Read,
    /// `write(2)`.
    Write,
    /// `fsync(2)`.
    Sync,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Sync => "fsync",
        })
    }
}

/// Error raised while opening or using a device handle.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The device node could not be opened.
    #[error("failed to open {} for {mode}: {source}", .path.display())]
    Open {
        /// Path of the device node.
        path: PathBuf,
        /// Requested access direction.
        mode: AccessMode,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A read, write, or sync call failed.
    #[error("{operation} on {} failed: {source}", .path.display())]
    Io {
        /// Path of the device node.
        path: PathBuf,
        /// Operation that failed.
        operation: Operation,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl DeviceError {
    pub(crate) fn open(path: &Path, mode: AccessMode, source: io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            mode,
            source,
        }
    }

    pub(crate) fn io(path: &Path, operation: Operation, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            operation,
            source,
        }
    }

    /// Returns the [`io::ErrorKind`] of the underlying error.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Open { source, .. } | Self::Io { source, .. } => source.kind(),
        }
    }

    /// Returns the path of the device involved.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_names_path_and_mode() {
        let err = DeviceError::open(
            Path::new("/dev/lpc-in"),
            AccessMode::Read,
            io::Error::from(io::ErrorKind::NotFound),
        );
        let text = err.to_string();
        assert!(text.contains("/dev/lpc-in"), "{text}");
        assert!(text.contains("reading"), "{text}");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn io_error_names_operation() {
        let err = DeviceError::io(
            Path::new("/dev/lpc-out"),
            Operation::Sync,
            io::Error::from(io::ErrorKind::InvalidInput),
        );
        assert!(err.to_string().starts_with("fsync on /dev/lpc-out failed"));
        assert_eq!(err.path(), Path::new("/dev/lpc-out"));
    }
}
