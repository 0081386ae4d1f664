//! Account and instruction discriminators.
//!
//! Every stored account begins with 8 bytes identifying its kind, and every
//! instruction payload begins with 8 bytes selecting the operation. Both
//! are the first 8 bytes of `SHA-256("<namespace>:<name>")`, with namespace
//! `account` for record kinds and `global` for operations.
//!
//! The vocabulary is closed (six records, nine operations), so the full
//! table is computed once and cached behind a single-assignment guard.

use std::sync::OnceLock;

use sha2::{Digest, Sha256};

use quill_types::instruction::Operation;
use quill_types::record::RecordKind;
use quill_types::DISCRIMINATOR_LEN;

/// Namespace for record-kind discriminators.
pub const NAMESPACE_ACCOUNT: &str = "account";

/// Namespace for operation discriminators.
pub const NAMESPACE_GLOBAL: &str = "global";

/// Compute the 8-byte discriminator for `"<namespace>:<name>"`.
///
/// Deterministic across calls and process restarts; collisions are
/// negligible for the fixed vocabulary.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut tag = [0u8; DISCRIMINATOR_LEN];
    tag.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    tag
}

/// Precomputed discriminators for every record kind and operation.
#[derive(Debug)]
pub struct DiscriminatorRegistry {
    accounts: [[u8; DISCRIMINATOR_LEN]; RecordKind::ALL.len()],
    operations: [[u8; DISCRIMINATOR_LEN]; Operation::ALL.len()],
}

impl DiscriminatorRegistry {
    /// Compute the full table.
    pub fn new() -> Self {
        let mut accounts = [[0u8; DISCRIMINATOR_LEN]; RecordKind::ALL.len()];
        for (slot, kind) in accounts.iter_mut().zip(RecordKind::ALL) {
            *slot = discriminator(NAMESPACE_ACCOUNT, kind.account_name());
        }
        let mut operations = [[0u8; DISCRIMINATOR_LEN]; Operation::ALL.len()];
        for (slot, op) in operations.iter_mut().zip(Operation::ALL) {
            *slot = discriminator(NAMESPACE_GLOBAL, op.wire_name());
        }
        Self {
            accounts,
            operations,
        }
    }

    /// The process-wide registry, computed on first use.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<DiscriminatorRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::new)
    }

    /// The discriminator prefixing stored accounts of `kind`.
    pub fn account(&self, kind: RecordKind) -> [u8; DISCRIMINATOR_LEN] {
        self.accounts[account_index(kind)]
    }

    /// The discriminator prefixing `op` instruction payloads.
    pub fn operation(&self, op: Operation) -> [u8; DISCRIMINATOR_LEN] {
        self.operations[operation_index(op)]
    }
}

impl Default for DiscriminatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const fn account_index(kind: RecordKind) -> usize {
    match kind {
        RecordKind::UserProfile => 0,
        RecordKind::Tweet => 1,
        RecordKind::Like => 2,
        RecordKind::Follow => 3,
        RecordKind::Retweet => 4,
        RecordKind::Bookmark => 5,
    }
}

const fn operation_index(op: Operation) -> usize {
    match op {
        Operation::CreateOrUpdateProfile => 0,
        Operation::PostTweet => 1,
        Operation::LikeTweet => 2,
        Operation::UnlikeTweet => 3,
        Operation::FollowUser => 4,
        Operation::UnfollowUser => 5,
        Operation::Retweet => 6,
        Operation::BookmarkTweet => 7,
        Operation::UnbookmarkTweet => 8,
    }
}
