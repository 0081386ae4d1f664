//! Primitive field codec.
//!
//! Encoders are free functions producing owned byte vectors; decoding goes
//! through [`Reader`], a bounds-checked cursor over a borrowed buffer. Every
//! encode/decode pair is a round-trip inverse for all valid inputs, and
//! decoders never read past the end of the buffer.

use quill_types::{Pubkey, PUBKEY_LEN};

use crate::{CodecError, Result};

/// Largest i64 magnitude shared losslessly with JavaScript clients
/// (2^53 - 1). Values beyond this are rejected on both encode and decode.
pub const SAFE_INTEGER_MAX: i64 = 9_007_199_254_740_991;

/// Presence tag for an absent optional value.
pub const OPTION_NONE: u8 = 0;

/// Presence tag for a present optional value.
pub const OPTION_SOME: u8 = 1;

/// Encode a string as `u32_le byte length || utf8 bytes`.
pub fn encode_string(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(4 + bytes.len());
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
    out
}

/// Encode an i64 as little-endian bytes.
///
/// # Errors
///
/// Returns [`CodecError::OutOfRange`] if the magnitude exceeds
/// [`SAFE_INTEGER_MAX`].
pub fn encode_i64(value: i64) -> Result<[u8; 8]> {
    check_safe_range(value)?;
    Ok(value.to_le_bytes())
}

/// Encode a 32-byte identifier as its raw bytes.
pub fn encode_pubkey(key: &Pubkey) -> [u8; PUBKEY_LEN] {
    key.to_bytes()
}

/// Encode an optional value as `u8 tag || payload if present`.
pub fn encode_option<T, F>(value: Option<&T>, encode: F) -> Vec<u8>
where
    F: FnOnce(&T) -> Vec<u8>,
{
    match value {
        None => vec![OPTION_NONE],
        Some(inner) => {
            let payload = encode(inner);
            let mut out = Vec::with_capacity(1 + payload.len());
            out.push(OPTION_SOME);
            out.extend_from_slice(&payload);
            out
        }
    }
}

fn check_safe_range(value: i64) -> Result<()> {
    if !(-SAFE_INTEGER_MAX..=SAFE_INTEGER_MAX).contains(&value) {
        return Err(CodecError::OutOfRange { value });
    }
    Ok(())
}

/// Bounds-checked decode cursor over a borrowed byte buffer.
///
/// Each `read_*` advances the cursor past the field it consumed. On error
/// the cursor is left at the failing field's start offset, which the error
/// value also reports.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current offset into the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::TruncatedBuffer {
                offset: self.offset,
                needed: len,
                remaining,
            });
        }
        let slice = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        let mut arr = [0u8; 4];
        arr.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(arr))
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// [`CodecError::TruncatedBuffer`] if the declared length runs past the
    /// buffer, [`CodecError::InvalidUtf8`] if the bytes are not UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32_le()? as usize;
        let start = self.offset;
        let bytes = self.take(len)?;
        let value = std::str::from_utf8(bytes)
            .map_err(|_| CodecError::InvalidUtf8 { offset: start })?;
        Ok(value.to_owned())
    }

    /// Read a little-endian i64, rejecting values outside the safe range.
    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        let value = i64::from_le_bytes(arr);
        check_safe_range(value)?;
        Ok(value)
    }

    /// Read a raw 32-byte identifier.
    pub fn read_pubkey(&mut self) -> Result<Pubkey> {
        let start = self.offset;
        let bytes = self.take(PUBKEY_LEN)?;
        Pubkey::try_from(bytes).map_err(|_| CodecError::TruncatedBuffer {
            offset: start,
            needed: PUBKEY_LEN,
            remaining: bytes.len(),
        })
    }

    /// Read an optional value: presence tag, then the payload if present.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidTag`] for any tag other than 0 or 1; the tag is
    /// corruption, not a decodable value.
    pub fn read_option<T, F>(&mut self, read: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let tag_offset = self.offset;
        match self.read_u8()? {
            OPTION_NONE => Ok(None),
            OPTION_SOME => Ok(Some(read(self)?)),
            tag => Err(CodecError::InvalidTag {
                offset: tag_offset,
                tag,
            }),
        }
    }
}
