//! Program operations and the instruction value types handed to the
//! transaction-submission collaborator.
//!
//! An [`Instruction`] is the complete unit a wallet signs and submits:
//! destination program, ordered account references, and the operation
//! payload (discriminator plus encoded arguments). This crate only defines
//! the shape; `quill-codec` fills in the bytes and submission belongs to an
//! external service.

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;

/// The closed set of operations the Quill program accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateOrUpdateProfile,
    PostTweet,
    LikeTweet,
    UnlikeTweet,
    FollowUser,
    UnfollowUser,
    Retweet,
    BookmarkTweet,
    UnbookmarkTweet,
}

impl Operation {
    /// All operations, in discriminator-registry order.
    pub const ALL: [Operation; 9] = [
        Operation::CreateOrUpdateProfile,
        Operation::PostTweet,
        Operation::LikeTweet,
        Operation::UnlikeTweet,
        Operation::FollowUser,
        Operation::UnfollowUser,
        Operation::Retweet,
        Operation::BookmarkTweet,
        Operation::UnbookmarkTweet,
    ];

    /// The snake_case name hashed into the discriminator
    /// (`"global:<name>"`).
    pub const fn wire_name(self) -> &'static str {
        match self {
            Operation::CreateOrUpdateProfile => "create_or_update_profile",
            Operation::PostTweet => "post_tweet",
            Operation::LikeTweet => "like_tweet",
            Operation::UnlikeTweet => "unlike_tweet",
            Operation::FollowUser => "follow_user",
            Operation::UnfollowUser => "unfollow_user",
            Operation::Retweet => "retweet",
            Operation::BookmarkTweet => "bookmark_tweet",
            Operation::UnbookmarkTweet => "unbookmark_tweet",
        }
    }
}

/// One account reference in an instruction's account list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable, non-signing account (record PDAs).
    pub fn writable(pubkey: Pubkey) -> Self {
        Self { pubkey, is_signer: false, is_writable: true }
    }

    /// A writable signing account (the fee-paying authority).
    pub fn signer(pubkey: Pubkey) -> Self {
        Self { pubkey, is_signer: true, is_writable: true }
    }

    /// A read-only, non-signing account.
    pub fn readonly(pubkey: Pubkey) -> Self {
        Self { pubkey, is_signer: false, is_writable: false }
    }
}

/// A fully assembled program instruction, ready for submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The program that executes this instruction.
    pub program_id: Pubkey,
    /// Ordered account references, per the program's expected layout.
    pub accounts: Vec<AccountMeta>,
    /// Discriminator followed by the encoded arguments.
    pub data: Vec<u8>,
}
