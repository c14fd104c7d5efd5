use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;

use logging::trace_device;

use crate::error::DeviceError;
use crate::handle::DeviceHandle;

/// Direction a device node is opened for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// Read-only, as the input stream.
    #[default]
    Read,
    /// Write-only in append mode, as the output stream.
    Append,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "reading",
            Self::Append => "appending",
        })
    }
}

/// Flags used to open a device node.
///
/// ```no_run
/// use device::DeviceOptions;
///
/// let out = DeviceOptions::append()
///     .nonblocking(true)
///     .synchronous(true)
///     .open("/dev/lpc-out".as_ref())?;
/// # Ok::<(), device::DeviceError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceOptions {
    access: AccessMode,
    nonblocking: bool,
    synchronous: bool,
}

impl DeviceOptions {
    /// Blocking read access.
    #[must_use]
    pub const fn read() -> Self {
        Self {
            access: AccessMode::Read,
            nonblocking: false,
            synchronous: false,
        }
    }

    /// Blocking append access.
    #[must_use]
    pub const fn append() -> Self {
        Self {
            access: AccessMode::Append,
            nonblocking: false,
            synchronous: false,
        }
    }

    /// Requests `O_NONBLOCK`.
    #[must_use]
    pub const fn nonblocking(mut self, enabled: bool) -> Self {
        self.nonblocking = enabled;
        self
    }

    /// Requests `O_SYNC`.
    #[must_use]
    pub const fn synchronous(mut self, enabled: bool) -> Self {
        self.synchronous = enabled;
        self
    }

    /// Returns the access direction.
    #[must_use]
    pub const fn access(&self) -> AccessMode {
        self.access
    }

    /// Returns `true` when `O_NONBLOCK` is requested.
    #[must_use]
    pub const fn is_nonblocking(&self) -> bool {
        self.nonblocking
    }

    /// Returns `true` when `O_SYNC` is requested.
    #[must_use]
    pub const fn is_synchronous(&self) -> bool {
        self.synchronous
    }

    /// Opens `path` with these flags. The node is never created.
    pub fn open(&self, path: &Path) -> Result<DeviceHandle, DeviceError> {
        let mut options = OpenOptions::new();
        match self.access {
            AccessMode::Read => options.read(true),
            AccessMode::Append => options.append(true),
        };
        self.apply_custom_flags(&mut options);

        let file = options
            .open(path)
            .map_err(|source| DeviceError::open(path, self.access, source))?;
        trace_device!(
            "opened {} for {} (nonblocking={}, sync={})",
            path.display(),
            self.access,
            self.nonblocking,
            self.synchronous
        );
        Ok(DeviceHandle::new(file, path.to_path_buf(), *self))
    }

    #[cfg(unix)]
    fn apply_custom_flags(&self, options: &mut OpenOptions) {
        use std::os::unix::fs::OpenOptionsExt;

        let mut flags = 0;
        if self.nonblocking {
            flags |= libc::O_NONBLOCK;
        }
        if self.synchronous {
            flags |= libc::O_SYNC;
        }
        options.custom_flags(flags);
    }

    #[cfg(not(unix))]
    fn apply_custom_flags(&self, _options: &mut OpenOptions) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn builders_set_flags() {
        let options = DeviceOptions::append().nonblocking(true).synchronous(true);
        assert_eq!(options.access(), AccessMode::Append);
        assert!(options.is_nonblocking());
        assert!(options.is_synchronous());

        let options = DeviceOptions::read();
        assert_eq!(options.access(), AccessMode::Read);
        assert!(!options.is_nonblocking());
    }

    #[test]
    fn open_never_creates_missing_nodes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing");

        let err = DeviceOptions::append()
            .open(&path)
            .expect_err("missing node");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }
}
