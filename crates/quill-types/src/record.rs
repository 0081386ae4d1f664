//! Decoded account records and the closed record-kind vocabulary.
//!
//! Each stored entry begins with an 8-byte discriminator identifying its
//! kind; the structs here are the decoded bodies that follow it. Field order
//! matches the on-chain layout and must not be reordered.

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;

/// The closed set of account kinds the Quill program stores.
///
/// The program's vocabulary is fixed; no dynamic registration exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    UserProfile,
    Tweet,
    Like,
    Follow,
    Retweet,
    Bookmark,
}

impl RecordKind {
    /// All record kinds, in discriminator-registry order.
    pub const ALL: [RecordKind; 6] = [
        RecordKind::UserProfile,
        RecordKind::Tweet,
        RecordKind::Like,
        RecordKind::Follow,
        RecordKind::Retweet,
        RecordKind::Bookmark,
    ];

    /// The PascalCase account name hashed into the discriminator
    /// (`"account:<name>"`).
    pub const fn account_name(self) -> &'static str {
        match self {
            RecordKind::UserProfile => "UserProfile",
            RecordKind::Tweet => "Tweet",
            RecordKind::Like => "Like",
            RecordKind::Follow => "Follow",
            RecordKind::Retweet => "Retweet",
            RecordKind::Bookmark => "Bookmark",
        }
    }

    /// The lowercase label used as the first seed when deriving this kind's
    /// addresses.
    pub const fn seed_label(self) -> &'static [u8] {
        match self {
            RecordKind::UserProfile => b"profile",
            RecordKind::Tweet => b"tweet",
            RecordKind::Like => b"like",
            RecordKind::Follow => b"follow",
            RecordKind::Retweet => b"retweet",
            RecordKind::Bookmark => b"bookmark",
        }
    }
}

/// A user's profile. At most one exists per wallet: the profile address is
/// derived from the authority alone, and `create_or_update_profile`
/// overwrites in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub authority: Pubkey,
    pub username: String,
    pub bio: String,
}

/// A post. `parent` is `None` for top-level posts and `Some` for replies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub authority: Pubkey,
    pub content: String,
    /// Client-supplied Unix timestamp; also a seed of the tweet's address.
    pub timestamp: i64,
    pub parent: Option<Pubkey>,
}

/// A like. One per (user, tweet) pair, enforced by address derivation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user: Pubkey,
    pub tweet: Pubkey,
}

/// A follow edge. One per (follower, following) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub follower: Pubkey,
    pub following: Pubkey,
}

/// A repost. One per (user, original tweet) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retweet {
    pub user: Pubkey,
    pub original_tweet: Pubkey,
    pub timestamp: i64,
}

/// A bookmark. One per (user, tweet) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub user: Pubkey,
    pub tweet: Pubkey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_names_are_pascal_case() {
        for kind in RecordKind::ALL {
            let name = kind.account_name();
            assert!(name.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_seed_labels_are_distinct() {
        for a in RecordKind::ALL {
            for b in RecordKind::ALL {
                if a != b {
                    assert_ne!(a.seed_label(), b.seed_label());
                }
            }
        }
    }
}
