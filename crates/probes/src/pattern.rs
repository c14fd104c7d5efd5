//! Ground-truth byte sequences.

use std::ops::Deref;

/// Immutable byte sequence used as the reference for integrity checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteSequence(Box<[u8]>);

impl ByteSequence {
    /// Borrows the bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for ByteSequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteSequence {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Returns `len` bytes where byte `i` equals `i mod 256`.
///
/// ```
/// let pattern = probes::ascending_pattern(258);
/// assert_eq!(&pattern[..3], &[0, 1, 2]);
/// assert_eq!(&pattern[255..], &[255, 0, 1]);
/// ```
#[must_use]
pub fn ascending_pattern(len: usize) -> ByteSequence {
    ByteSequence((0..len).map(|i| i as u8).collect())
}

/// First offset where `actual` differs from `expected`, with both bytes.
///
/// Only the common prefix is compared; length differences are the caller's
/// concern.
pub(crate) fn first_mismatch(expected: &[u8], actual: &[u8]) -> Option<(usize, u8, u8)> {
    expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .map(|offset| (offset, expected[offset], actual[offset]))
}
