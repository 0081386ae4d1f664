//! # quill-codec
//!
//! Account/instruction codec and address derivation for the Quill program.
//!
//! The deployed program defines an exact byte layout for every stored
//! account and every instruction payload; this crate reproduces it
//! bit-for-bit. It implements:
//!
//! - [`wire`] — primitive field codec (length-prefixed strings, i64 halves,
//!   32-byte identifiers, optional values)
//! - [`discriminator`] — 8-byte SHA-256 tags classifying accounts and
//!   routing instructions
//! - [`record`] — typed decode of the six stored account kinds, typed
//!   encode for fixtures and round-trip checks
//! - [`instruction`] — payload + account-list builders for the nine
//!   program operations
//! - [`pda`] — deterministic per-entity address derivation
//!
//! ## Layout
//!
//! ```text
//! stored account:  discriminator (8) || fields in fixed order
//! instruction:     discriminator (8) || args in fixed order
//! string field:    u32_le byte length || utf8 bytes
//! i64 field:       little-endian, restricted to ±(2^53 - 1)
//! option field:    u8 tag (0|1) || payload if 1
//! identifier:      raw 32 bytes
//! ```
//!
//! Everything here is synchronous and pure; the only shared state is the
//! discriminator cache, computed once behind a single-assignment guard.

pub mod discriminator;
pub mod instruction;
pub mod pda;
pub mod record;
pub mod wire;

use quill_types::record::RecordKind;

/// Error types for codec operations.
///
/// Decode functions fail fast with the most specific variant; no decoder
/// ever substitutes a default for a missing or malformed field.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Fewer bytes remain than a field requires.
    #[error("buffer truncated at offset {offset}: need {needed} bytes, {remaining} remain")]
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// An optional field carried a presence tag other than 0 or 1.
    #[error("invalid option tag {tag:#04x} at offset {offset}")]
    InvalidTag { offset: usize, tag: u8 },

    /// An i64 value falls outside the safely representable range shared
    /// with JavaScript clients.
    #[error("integer {value} outside the safely representable range")]
    OutOfRange { value: i64 },

    /// A string field is not valid UTF-8.
    #[error("invalid UTF-8 in string field at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// The 8-byte prefix does not match the expected record kind.
    #[error("discriminator mismatch: expected {expected:?}, found {found:02x?}")]
    DiscriminatorMismatch {
        expected: RecordKind,
        found: [u8; 8],
    },

    /// A field inside a record failed to decode.
    #[error("malformed {kind:?} record: {source}")]
    MalformedRecord {
        kind: RecordKind,
        source: Box<CodecError>,
    },

    /// The seed set was rejected by the underlying address space.
    #[error("address derivation failed: {0}")]
    AddressDerivation(String),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::TruncatedBuffer {
            offset: 4,
            needed: 32,
            remaining: 10,
        };
        assert!(err.to_string().contains("offset 4"));
        assert!(err.to_string().contains("32"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_malformed_record_wraps_source() {
        let inner = CodecError::InvalidTag { offset: 40, tag: 7 };
        let err = CodecError::MalformedRecord {
            kind: RecordKind::Tweet,
            source: Box::new(inner),
        };
        assert!(err.to_string().contains("Tweet"));
        assert!(err.to_string().contains("0x07"));
    }
}
