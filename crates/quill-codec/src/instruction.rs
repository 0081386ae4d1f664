//! Instruction payload and account-list builders.
//!
//! Each builder produces a complete [`Instruction`]: the operation
//! discriminator followed by its arguments in wire order, plus the account
//! references the program expects. Callers derive the destination PDA via
//! [`crate::pda::AddressDeriver`] first; nothing here submits transactions.
//!
//! Account ordering follows the program's instruction contexts: the record
//! PDA, the fee-paying authority, any referenced account the record stores,
//! then the system program for account-creating operations. Delete
//! operations close the record back to the authority and reference nothing
//! else.

use quill_types::instruction::{AccountMeta, Instruction, Operation};
use quill_types::{Pubkey, SYSTEM_PROGRAM_ID};

use crate::discriminator::DiscriminatorRegistry;
use crate::wire::{encode_i64, encode_option, encode_pubkey, encode_string};
use crate::Result;

/// Builds instructions for one deployed program.
#[derive(Clone, Debug)]
pub struct InstructionEncoder {
    program_id: Pubkey,
}

impl InstructionEncoder {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    fn payload(&self, op: Operation, args: &[&[u8]]) -> Vec<u8> {
        let mut data = DiscriminatorRegistry::global().operation(op).to_vec();
        for arg in args {
            data.extend_from_slice(arg);
        }
        data
    }

    fn build(&self, op: Operation, accounts: Vec<AccountMeta>, args: &[&[u8]]) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts,
            data: self.payload(op, args),
        }
    }

    /// `create_or_update_profile(username, bio)` targeting the profile PDA.
    pub fn create_or_update_profile(
        &self,
        profile: Pubkey,
        authority: Pubkey,
        username: &str,
        bio: &str,
    ) -> Instruction {
        self.build(
            Operation::CreateOrUpdateProfile,
            vec![
                AccountMeta::writable(profile),
                AccountMeta::signer(authority),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            &[&encode_string(username), &encode_string(bio)],
        )
    }

    /// `post_tweet(content, timestamp, parent)` targeting the tweet PDA.
    ///
    /// # Errors
    ///
    /// [`crate::CodecError::OutOfRange`] if the timestamp cannot be
    /// wire-encoded.
    pub fn post_tweet(
        &self,
        tweet: Pubkey,
        authority: Pubkey,
        content: &str,
        timestamp: i64,
        parent: Option<&Pubkey>,
    ) -> Result<Instruction> {
        let ts = encode_i64(timestamp)?;
        Ok(self.build(
            Operation::PostTweet,
            vec![
                AccountMeta::writable(tweet),
                AccountMeta::signer(authority),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            &[
                &encode_string(content),
                &ts,
                &encode_option(parent, |k| encode_pubkey(k).to_vec()),
            ],
        ))
    }

    /// `like_tweet()` targeting the (user, tweet) like PDA.
    pub fn like_tweet(&self, like: Pubkey, authority: Pubkey, tweet: Pubkey) -> Instruction {
        self.build(
            Operation::LikeTweet,
            vec![
                AccountMeta::writable(like),
                AccountMeta::signer(authority),
                AccountMeta::readonly(tweet),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            &[],
        )
    }

    /// `unlike_tweet()` closing the like PDA.
    pub fn unlike_tweet(&self, like: Pubkey, authority: Pubkey) -> Instruction {
        self.build(
            Operation::UnlikeTweet,
            vec![AccountMeta::writable(like), AccountMeta::signer(authority)],
            &[],
        )
    }

    /// `follow_user()` targeting the (follower, following) follow PDA.
    pub fn follow_user(&self, follow: Pubkey, authority: Pubkey, following: Pubkey) -> Instruction {
        self.build(
            Operation::FollowUser,
            vec![
                AccountMeta::writable(follow),
                AccountMeta::signer(authority),
                AccountMeta::readonly(following),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            &[],
        )
    }

    /// `unfollow_user()` closing the follow PDA.
    pub fn unfollow_user(&self, follow: Pubkey, authority: Pubkey) -> Instruction {
        self.build(
            Operation::UnfollowUser,
            vec![AccountMeta::writable(follow), AccountMeta::signer(authority)],
            &[],
        )
    }

    /// `retweet(timestamp)` targeting the (user, tweet) retweet PDA.
    ///
    /// # Errors
    ///
    /// [`crate::CodecError::OutOfRange`] if the timestamp cannot be
    /// wire-encoded.
    pub fn retweet(
        &self,
        retweet: Pubkey,
        authority: Pubkey,
        tweet: Pubkey,
        timestamp: i64,
    ) -> Result<Instruction> {
        let ts = encode_i64(timestamp)?;
        Ok(self.build(
            Operation::Retweet,
            vec![
                AccountMeta::writable(retweet),
                AccountMeta::signer(authority),
                AccountMeta::readonly(tweet),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            &[&ts],
        ))
    }

    /// `bookmark_tweet()` targeting the (user, tweet) bookmark PDA.
    pub fn bookmark_tweet(&self, bookmark: Pubkey, authority: Pubkey, tweet: Pubkey) -> Instruction {
        self.build(
            Operation::BookmarkTweet,
            vec![
                AccountMeta::writable(bookmark),
                AccountMeta::signer(authority),
                AccountMeta::readonly(tweet),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            &[],
        )
    }

    /// `unbookmark_tweet()` closing the bookmark PDA.
    pub fn unbookmark_tweet(&self, bookmark: Pubkey, authority: Pubkey) -> Instruction {
        self.build(
            Operation::UnbookmarkTweet,
            vec![
                AccountMeta::writable(bookmark),
                AccountMeta::signer(authority),
            ],
            &[],
        )
    }
}

#[cfg(test)]
mod tests {
    use quill_types::DEFAULT_PROGRAM_ID;

    use crate::discriminator::DiscriminatorRegistry;
    use crate::wire::Reader;

    use super::*;

    fn key_of(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn encoder() -> InstructionEncoder {
        InstructionEncoder::new(DEFAULT_PROGRAM_ID)
    }

    #[test]
    fn test_post_tweet_payload_layout() {
        let ix = encoder()
            .post_tweet(key_of(1), key_of(2), "hello", 1_700_000_000, None)
            .expect("encode");
        let expected = DiscriminatorRegistry::global().operation(Operation::PostTweet);
        assert_eq!(ix.data[..8], expected);

        let mut reader = Reader::new(&ix.data[8..]);
        assert_eq!(reader.read_string().expect("content"), "hello");
        assert_eq!(reader.read_i64().expect("timestamp"), 1_700_000_000);
        assert_eq!(reader.read_option(Reader::read_pubkey).expect("parent"), None);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_post_tweet_with_parent() {
        let parent = key_of(0x01);
        let ix = encoder()
            .post_tweet(key_of(1), key_of(2), "re", 1_700_000_000, Some(&parent))
            .expect("encode");
        let mut reader = Reader::new(&ix.data[8..]);
        reader.read_string().expect("content");
        reader.read_i64().expect("timestamp");
        assert_eq!(
            reader.read_option(Reader::read_pubkey).expect("parent"),
            Some(parent)
        );
    }

    #[test]
    fn test_profile_payload_layout() {
        let ix = encoder().create_or_update_profile(key_of(1), key_of(2), "ada", "bio");
        let mut reader = Reader::new(&ix.data[8..]);
        assert_eq!(reader.read_string().expect("username"), "ada");
        assert_eq!(reader.read_string().expect("bio"), "bio");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_flag_operations_carry_no_args() {
        let e = encoder();
        for ix in [
            e.like_tweet(key_of(1), key_of(2), key_of(3)),
            e.unlike_tweet(key_of(1), key_of(2)),
            e.follow_user(key_of(1), key_of(2), key_of(3)),
            e.unfollow_user(key_of(1), key_of(2)),
            e.bookmark_tweet(key_of(1), key_of(2), key_of(3)),
            e.unbookmark_tweet(key_of(1), key_of(2)),
        ] {
            assert_eq!(ix.data.len(), 8);
        }
    }

    #[test]
    fn test_create_accounts_reference_system_program() {
        let ix = encoder().like_tweet(key_of(1), key_of(2), key_of(3));
        assert_eq!(ix.accounts.len(), 4);
        assert!(ix.accounts[0].is_writable && !ix.accounts[0].is_signer);
        assert!(ix.accounts[1].is_signer);
        assert_eq!(ix.accounts[3].pubkey, SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn test_retweet_encodes_timestamp_arg() {
        let ix = encoder()
            .retweet(key_of(1), key_of(2), key_of(3), 1_699_999_999)
            .expect("encode");
        let mut reader = Reader::new(&ix.data[8..]);
        assert_eq!(reader.read_i64().expect("timestamp"), 1_699_999_999);
        assert_eq!(reader.remaining(), 0);
    }
}
