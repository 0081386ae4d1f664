//! Deterministic per-entity address derivation.
//!
//! Every record lives at a program-derived address (PDA) computed from a
//! fixed seed tuple: the kind's lowercase label followed by the identifying
//! keys, with the tweet timestamp encoded exactly as its wire field. The
//! same seeds always yield the same address, which is what de-duplicates
//! likes, follows, retweets and bookmarks on chain.
//!
//! The underlying address space (bump search, off-curve requirement) is the
//! runtime's primitive; this module only fixes the seed orderings.

use quill_types::record::RecordKind;
use quill_types::Pubkey;

use crate::wire::encode_i64;
use crate::{CodecError, Result};

/// Derives record addresses for one deployed program.
///
/// The owning program id is explicit construction state, never read from a
/// global.
#[derive(Clone, Debug)]
pub struct AddressDeriver {
    program_id: Pubkey,
}

impl AddressDeriver {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// The program this deriver targets.
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    fn derive(&self, seeds: &[&[u8]]) -> Result<(Pubkey, u8)> {
        Pubkey::try_find_program_address(seeds, &self.program_id).ok_or_else(|| {
            CodecError::AddressDerivation(format!(
                "no viable bump for program {}",
                self.program_id
            ))
        })
    }

    /// Profile address: `["profile", authority]`. One profile per wallet.
    pub fn profile(&self, authority: &Pubkey) -> Result<(Pubkey, u8)> {
        self.derive(&[RecordKind::UserProfile.seed_label(), authority.as_ref()])
    }

    /// Tweet address: `["tweet", authority, i64_le(timestamp)]`.
    ///
    /// # Errors
    ///
    /// [`CodecError::OutOfRange`] if the timestamp cannot be wire-encoded.
    pub fn tweet(&self, authority: &Pubkey, timestamp: i64) -> Result<(Pubkey, u8)> {
        let ts = encode_i64(timestamp)?;
        self.derive(&[RecordKind::Tweet.seed_label(), authority.as_ref(), &ts])
    }

    /// Like address: `["like", user, tweet]`.
    pub fn like(&self, user: &Pubkey, tweet: &Pubkey) -> Result<(Pubkey, u8)> {
        self.derive(&[RecordKind::Like.seed_label(), user.as_ref(), tweet.as_ref()])
    }

    /// Follow address: `["follow", follower, following]`.
    pub fn follow(&self, follower: &Pubkey, following: &Pubkey) -> Result<(Pubkey, u8)> {
        self.derive(&[
            RecordKind::Follow.seed_label(),
            follower.as_ref(),
            following.as_ref(),
        ])
    }

    /// Retweet address: `["retweet", user, original tweet]`.
    pub fn retweet(&self, user: &Pubkey, tweet: &Pubkey) -> Result<(Pubkey, u8)> {
        self.derive(&[
            RecordKind::Retweet.seed_label(),
            user.as_ref(),
            tweet.as_ref(),
        ])
    }

    /// Bookmark address: `["bookmark", user, tweet]`.
    pub fn bookmark(&self, user: &Pubkey, tweet: &Pubkey) -> Result<(Pubkey, u8)> {
        self.derive(&[
            RecordKind::Bookmark.seed_label(),
            user.as_ref(),
            tweet.as_ref(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use quill_types::DEFAULT_PROGRAM_ID;

    use super::*;

    fn key_of(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn deriver() -> AddressDeriver {
        AddressDeriver::new(DEFAULT_PROGRAM_ID)
    }

    #[test]
    fn test_profile_address_deterministic() {
        let owner = key_of(0x10);
        let (a, bump_a) = deriver().profile(&owner).expect("derive");
        let (b, bump_b) = deriver().profile(&owner).expect("derive");
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
    }

    #[test]
    fn test_like_address_dedups_pair() {
        let user = key_of(0x20);
        let tweet = key_of(0x21);
        let (first, _) = deriver().like(&user, &tweet).expect("derive");
        let (second, _) = deriver().like(&user, &tweet).expect("derive");
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_seed_byte_changes_address() {
        let user = key_of(0x20);
        let (base, _) = deriver().like(&user, &key_of(0x21)).expect("derive");
        let (other, _) = deriver().like(&user, &key_of(0x22)).expect("derive");
        assert_ne!(base, other);
    }

    #[test]
    fn test_kinds_do_not_collide_on_same_pair() {
        let user = key_of(0x30);
        let tweet = key_of(0x31);
        let d = deriver();
        let (like, _) = d.like(&user, &tweet).expect("derive");
        let (retweet, _) = d.retweet(&user, &tweet).expect("derive");
        let (bookmark, _) = d.bookmark(&user, &tweet).expect("derive");
        assert_ne!(like, retweet);
        assert_ne!(like, bookmark);
        assert_ne!(retweet, bookmark);
    }

    #[test]
    fn test_tweet_timestamp_is_a_seed() {
        let author = key_of(0x40);
        let d = deriver();
        let (a, _) = d.tweet(&author, 1_700_000_000).expect("derive");
        let (b, _) = d.tweet(&author, 1_700_000_001).expect("derive");
        assert_ne!(a, b);
    }

    #[test]
    fn test_tweet_rejects_unencodable_timestamp() {
        let author = key_of(0x40);
        assert!(matches!(
            deriver().tweet(&author, i64::MAX),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_program_id_changes_address() {
        let owner = key_of(0x50);
        let (a, _) = deriver().profile(&owner).expect("derive");
        let other = AddressDeriver::new(key_of(0x7f));
        let (b, _) = other.profile(&owner).expect("derive");
        assert_ne!(a, b);
    }
}
