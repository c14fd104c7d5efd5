//! Byte-size arguments with optional binary suffixes.

use std::ffi::OsStr;

/// Why a size argument was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SizeParseError {
    #[error("{flag} value must not be empty")]
    Empty { flag: &'static str },
    #[error("invalid {flag} '{value}': expected a size with an optional K/M/G suffix")]
    Invalid { flag: &'static str, value: String },
    #[error("invalid {flag} '{value}': size must be positive")]
    Zero { flag: &'static str, value: String },
    #[error("invalid {flag} '{value}': size exceeds the supported range")]
    TooLarge { flag: &'static str, value: String },
}

/// Parses `4096`, `64K`, `1M`, or `1G` (powers of 1024, case-insensitive).
pub(crate) fn parse_size_argument(value: &OsStr, flag: &'static str) -> Result<u64, SizeParseError> {
    let text = value.to_string_lossy();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::Empty { flag });
    }
    let invalid = || SizeParseError::Invalid {
        flag,
        value: trimmed.to_owned(),
    };

    let (digits, shift) = match trimmed.as_bytes()[trimmed.len() - 1].to_ascii_uppercase() {
        b'K' => (&trimmed[..trimmed.len() - 1], 10),
        b'M' => (&trimmed[..trimmed.len() - 1], 20),
        b'G' => (&trimmed[..trimmed.len() - 1], 30),
        b'0'..=b'9' => (trimmed, 0),
        _ => return Err(invalid()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let base: u64 = digits.parse().map_err(|_| SizeParseError::TooLarge {
        flag,
        value: trimmed.to_owned(),
    })?;
    let bytes = base
        .checked_mul(1u64 << shift)
        .ok_or_else(|| SizeParseError::TooLarge {
            flag,
            value: trimmed.to_owned(),
        })?;
    if bytes == 0 {
        return Err(SizeParseError::Zero {
            flag,
            value: trimmed.to_owned(),
        });
    }
    Ok(bytes)
}

/// Like [`parse_size_argument`] but bounded by the address space.
pub(crate) fn parse_buffer_size_argument(
    value: &OsStr,
    flag: &'static str,
) -> Result<usize, SizeParseError> {
    let bytes = parse_size_argument(value, flag)?;
    usize::try_from(bytes).map_err(|_| SizeParseError::TooLarge {
        flag,
        value: value.to_string_lossy().trim().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<u64, SizeParseError> {
        parse_size_argument(OsStr::new(text), "--write-ceiling")
    }

    #[test]
    fn plain_byte_counts() {
        assert_eq!(parse("4096"), Ok(4096));
        assert_eq!(parse(" 12 "), Ok(12));
    }

    #[test]
    fn binary_suffixes() {
        assert_eq!(parse("64K"), Ok(64 * 1024));
        assert_eq!(parse("1m"), Ok(1024 * 1024));
        assert_eq!(parse("2G"), Ok(2 * 1024 * 1024 * 1024));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse("10QB"), Err(SizeParseError::Invalid { .. })));
        assert!(matches!(parse("K"), Err(SizeParseError::Invalid { .. })));
        assert!(matches!(parse("-2"), Err(SizeParseError::Invalid { .. })));
        assert!(matches!(parse("1.5K"), Err(SizeParseError::Invalid { .. })));
    }

    #[test]
    fn rejects_empty_and_zero() {
        assert_eq!(parse(""), Err(SizeParseError::Empty { flag: "--write-ceiling" }));
        let err = parse("0K").expect_err("zero");
        assert!(err.to_string().contains("must be positive"), "{err}");
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(
            parse("99999999999999999999"),
            Err(SizeParseError::TooLarge { .. })
        ));
        assert!(matches!(
            parse("17179869184G"),
            Err(SizeParseError::TooLarge { .. })
        ));
    }
}
