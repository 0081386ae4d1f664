//! Typed decode and encode of stored account records.
//!
//! [`AccountRecord::decode`] verifies the 8-byte discriminator, then reads
//! the body fields in the program's fixed order. Field orders here mirror
//! the deployed account layouts and must not be reordered. Encode exists
//! for fixtures and round-trip checks; the program itself writes accounts.

use quill_types::record::{
    Bookmark, Follow, Like, RecordKind, Retweet, Tweet, UserProfile,
};
use quill_types::DISCRIMINATOR_LEN;

use crate::discriminator::DiscriminatorRegistry;
use crate::wire::{encode_i64, encode_option, encode_pubkey, encode_string, Reader};
use crate::{CodecError, Result};

/// A record type with a fixed on-chain layout.
pub trait AccountRecord: Sized {
    /// The kind whose discriminator prefixes stored entries of this type.
    const KIND: RecordKind;

    /// Decode the body fields, positioned just past the discriminator.
    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self>;

    /// Append the body fields in wire order.
    fn encode_fields(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Decode a raw stored entry, discriminator included.
    ///
    /// # Errors
    ///
    /// [`CodecError::DiscriminatorMismatch`] if the prefix identifies a
    /// different kind, [`CodecError::MalformedRecord`] wrapping the field
    /// failure otherwise.
    fn decode(data: &[u8]) -> Result<Self> {
        let remaining = data.len();
        if remaining < DISCRIMINATOR_LEN {
            return Err(CodecError::TruncatedBuffer {
                offset: 0,
                needed: DISCRIMINATOR_LEN,
                remaining,
            });
        }
        let mut found = [0u8; DISCRIMINATOR_LEN];
        found.copy_from_slice(&data[..DISCRIMINATOR_LEN]);
        if found != DiscriminatorRegistry::global().account(Self::KIND) {
            return Err(CodecError::DiscriminatorMismatch {
                expected: Self::KIND,
                found,
            });
        }
        let mut reader = Reader::new(&data[DISCRIMINATOR_LEN..]);
        Self::decode_fields(&mut reader).map_err(|source| CodecError::MalformedRecord {
            kind: Self::KIND,
            source: Box::new(source),
        })
    }

    /// Encode a full entry: discriminator followed by the body fields.
    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = DiscriminatorRegistry::global()
            .account(Self::KIND)
            .to_vec();
        self.encode_fields(&mut out)?;
        Ok(out)
    }
}

/// Whether a raw entry's prefix identifies it as `kind`.
///
/// Entries shorter than the prefix are no kind at all.
pub fn is_record_of_kind(data: &[u8], kind: RecordKind) -> bool {
    data.len() >= DISCRIMINATOR_LEN
        && data[..DISCRIMINATOR_LEN] == DiscriminatorRegistry::global().account(kind)
}

impl AccountRecord for UserProfile {
    const KIND: RecordKind = RecordKind::UserProfile;

    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            authority: reader.read_pubkey()?,
            username: reader.read_string()?,
            bio: reader.read_string()?,
        })
    }

    fn encode_fields(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&encode_pubkey(&self.authority));
        out.extend_from_slice(&encode_string(&self.username));
        out.extend_from_slice(&encode_string(&self.bio));
        Ok(())
    }
}

impl AccountRecord for Tweet {
    const KIND: RecordKind = RecordKind::Tweet;

    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            authority: reader.read_pubkey()?,
            content: reader.read_string()?,
            timestamp: reader.read_i64()?,
            parent: reader.read_option(Reader::read_pubkey)?,
        })
    }

    fn encode_fields(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&encode_pubkey(&self.authority));
        out.extend_from_slice(&encode_string(&self.content));
        out.extend_from_slice(&encode_i64(self.timestamp)?);
        out.extend_from_slice(&encode_option(self.parent.as_ref(), |k| {
            encode_pubkey(k).to_vec()
        }));
        Ok(())
    }
}

impl AccountRecord for Like {
    const KIND: RecordKind = RecordKind::Like;

    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            user: reader.read_pubkey()?,
            tweet: reader.read_pubkey()?,
        })
    }

    fn encode_fields(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&encode_pubkey(&self.user));
        out.extend_from_slice(&encode_pubkey(&self.tweet));
        Ok(())
    }
}

impl AccountRecord for Follow {
    const KIND: RecordKind = RecordKind::Follow;

    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            follower: reader.read_pubkey()?,
            following: reader.read_pubkey()?,
        })
    }

    fn encode_fields(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&encode_pubkey(&self.follower));
        out.extend_from_slice(&encode_pubkey(&self.following));
        Ok(())
    }
}

impl AccountRecord for Retweet {
    const KIND: RecordKind = RecordKind::Retweet;

    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            user: reader.read_pubkey()?,
            original_tweet: reader.read_pubkey()?,
            timestamp: reader.read_i64()?,
        })
    }

    fn encode_fields(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&encode_pubkey(&self.user));
        out.extend_from_slice(&encode_pubkey(&self.original_tweet));
        out.extend_from_slice(&encode_i64(self.timestamp)?);
        Ok(())
    }
}

impl AccountRecord for Bookmark {
    const KIND: RecordKind = RecordKind::Bookmark;

    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            user: reader.read_pubkey()?,
            tweet: reader.read_pubkey()?,
        })
    }

    fn encode_fields(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&encode_pubkey(&self.user));
        out.extend_from_slice(&encode_pubkey(&self.tweet));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quill_types::Pubkey;

    use super::*;

    fn key_of(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn test_profile_round_trip() {
        let profile = UserProfile {
            authority: key_of(0x11),
            username: "ada".into(),
            bio: "analytical engines".into(),
        };
        let encoded = profile.encode().expect("encode");
        assert_eq!(UserProfile::decode(&encoded).expect("decode"), profile);
    }

    #[test]
    fn test_tweet_round_trip_without_parent() {
        let tweet = Tweet {
            authority: key_of(0x22),
            content: "hello".into(),
            timestamp: 1_700_000_000,
            parent: None,
        };
        let encoded = tweet.encode().expect("encode");
        let decoded = Tweet::decode(&encoded).expect("decode");
        assert_eq!(decoded.content, "hello");
        assert_eq!(decoded.timestamp, 1_700_000_000);
        assert_eq!(decoded.parent, None);
    }

    #[test]
    fn test_tweet_round_trip_with_parent() {
        let parent = key_of(0x01);
        let tweet = Tweet {
            authority: key_of(0x22),
            content: "reply".into(),
            timestamp: 1_700_000_001,
            parent: Some(parent),
        };
        let encoded = tweet.encode().expect("encode");
        assert_eq!(Tweet::decode(&encoded).expect("decode").parent, Some(parent));
    }

    #[test]
    fn test_retweet_round_trip() {
        let retweet = Retweet {
            user: key_of(0x33),
            original_tweet: key_of(0x44),
            timestamp: 1_699_999_999,
        };
        let encoded = retweet.encode().expect("encode");
        assert_eq!(Retweet::decode(&encoded).expect("decode"), retweet);
    }

    #[test]
    fn test_kind_isolation() {
        let like = Like {
            user: key_of(0x01),
            tweet: key_of(0x02),
        };
        let encoded = like.encode().expect("encode");
        assert!(is_record_of_kind(&encoded, RecordKind::Like));
        for kind in RecordKind::ALL {
            if kind != RecordKind::Like {
                assert!(!is_record_of_kind(&encoded, kind));
            }
        }
    }

    #[test]
    fn test_cross_kind_decode_rejected() {
        let follow = Follow {
            follower: key_of(0x05),
            following: key_of(0x06),
        };
        let encoded = follow.encode().expect("encode");
        let err = Like::decode(&encoded).expect_err("must reject");
        assert!(matches!(
            err,
            CodecError::DiscriminatorMismatch {
                expected: RecordKind::Like,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_body_is_malformed() {
        let tweet = Tweet {
            authority: key_of(0x22),
            content: "hello".into(),
            timestamp: 1,
            parent: None,
        };
        let mut encoded = tweet.encode().expect("encode");
        encoded.truncate(encoded.len() - 3);
        let err = Tweet::decode(&encoded).expect_err("must reject");
        assert!(matches!(
            err,
            CodecError::MalformedRecord {
                kind: RecordKind::Tweet,
                ..
            }
        ));
    }

    #[test]
    fn test_short_entry_is_truncated() {
        assert!(matches!(
            Tweet::decode(&[0u8; 4]),
            Err(CodecError::TruncatedBuffer { needed: 8, .. })
        ));
        assert!(!is_record_of_kind(&[0u8; 4], RecordKind::Tweet));
    }
}
