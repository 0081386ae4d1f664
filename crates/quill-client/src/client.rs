//! High-level client: one method per program operation, plus typed reads.
//!
//! Write methods derive the destination address, build the instruction and
//! hand it to the [`TransactionSender`] collaborator; the wallet owns
//! signing and submission. Nothing is cached: reads always go back to the
//! store.

use async_trait::async_trait;

use quill_codec::instruction::InstructionEncoder;
use quill_codec::pda::AddressDeriver;
use quill_types::instruction::Instruction;
use quill_types::record::{Bookmark, Follow, Like, Retweet, Tweet, UserProfile};
use quill_types::Pubkey;

use crate::query::QueryClient;
use crate::store::AccountStore;
use crate::{ClientError, Result};

/// The transaction-submission collaborator (wallet/connection).
///
/// Accepts fully built instructions and returns the confirmation signature.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    async fn send(&self, instructions: &[Instruction]) -> Result<String>;
}

/// Client for one wallet against one deployed Quill program.
pub struct QuillClient<S, T> {
    query: QueryClient<S>,
    deriver: AddressDeriver,
    encoder: InstructionEncoder,
    sender: T,
    authority: Pubkey,
}

impl<S: AccountStore, T: TransactionSender> QuillClient<S, T> {
    /// Build a client; the program id is explicit, never read from a
    /// global.
    pub fn new(store: S, sender: T, program_id: Pubkey, authority: Pubkey) -> Self {
        Self {
            query: QueryClient::new(store, program_id),
            deriver: AddressDeriver::new(program_id),
            encoder: InstructionEncoder::new(program_id),
            sender,
            authority,
        }
    }

    /// The read-side query client.
    pub fn query(&self) -> &QueryClient<S> {
        &self.query
    }

    /// The address deriver for this program.
    pub fn deriver(&self) -> &AddressDeriver {
        &self.deriver
    }

    /// The wallet this client writes as.
    pub fn authority(&self) -> &Pubkey {
        &self.authority
    }

    // --- reads ---

    /// The profile owned by `owner`, if one exists.
    pub async fn profile_of(&self, owner: &Pubkey) -> Result<Option<UserProfile>> {
        let (address, _) = self.deriver.profile(owner)?;
        self.query.fetch_at(&address).await
    }

    pub async fn fetch_profiles(&self) -> Result<Vec<(Pubkey, UserProfile)>> {
        self.query.fetch_all().await
    }

    pub async fn fetch_tweets(&self) -> Result<Vec<(Pubkey, Tweet)>> {
        self.query.fetch_all().await
    }

    pub async fn fetch_likes(&self) -> Result<Vec<(Pubkey, Like)>> {
        self.query.fetch_all().await
    }

    pub async fn fetch_follows(&self) -> Result<Vec<(Pubkey, Follow)>> {
        self.query.fetch_all().await
    }

    pub async fn fetch_retweets(&self) -> Result<Vec<(Pubkey, Retweet)>> {
        self.query.fetch_all().await
    }

    pub async fn fetch_bookmarks(&self) -> Result<Vec<(Pubkey, Bookmark)>> {
        self.query.fetch_all().await
    }

    // --- writes ---

    /// Create the authority's profile, or update it in place.
    pub async fn create_or_update_profile(&self, username: &str, bio: &str) -> Result<String> {
        let (profile, _) = self.deriver.profile(&self.authority)?;
        let ix = self
            .encoder
            .create_or_update_profile(profile, self.authority, username, bio);
        self.submit(ix).await
    }

    /// Post a tweet; `parent` makes it a reply.
    pub async fn post_tweet(
        &self,
        content: &str,
        timestamp: i64,
        parent: Option<&Pubkey>,
    ) -> Result<String> {
        let (tweet, _) = self.deriver.tweet(&self.authority, timestamp)?;
        let ix = self
            .encoder
            .post_tweet(tweet, self.authority, content, timestamp, parent)?;
        self.submit(ix).await
    }

    pub async fn like_tweet(&self, tweet: &Pubkey) -> Result<String> {
        let (like, _) = self.deriver.like(&self.authority, tweet)?;
        self.submit(self.encoder.like_tweet(like, self.authority, *tweet))
            .await
    }

    pub async fn unlike_tweet(&self, tweet: &Pubkey) -> Result<String> {
        let (like, _) = self.deriver.like(&self.authority, tweet)?;
        self.submit(self.encoder.unlike_tweet(like, self.authority))
            .await
    }

    /// Follow `user`. Following yourself is rejected client-side.
    pub async fn follow_user(&self, user: &Pubkey) -> Result<String> {
        if *user == self.authority {
            return Err(ClientError::SelfFollow);
        }
        let (follow, _) = self.deriver.follow(&self.authority, user)?;
        self.submit(self.encoder.follow_user(follow, self.authority, *user))
            .await
    }

    pub async fn unfollow_user(&self, user: &Pubkey) -> Result<String> {
        let (follow, _) = self.deriver.follow(&self.authority, user)?;
        self.submit(self.encoder.unfollow_user(follow, self.authority))
            .await
    }

    pub async fn retweet(&self, tweet: &Pubkey, timestamp: i64) -> Result<String> {
        let (retweet, _) = self.deriver.retweet(&self.authority, tweet)?;
        self.submit(
            self.encoder
                .retweet(retweet, self.authority, *tweet, timestamp)?,
        )
        .await
    }

    pub async fn bookmark_tweet(&self, tweet: &Pubkey) -> Result<String> {
        let (bookmark, _) = self.deriver.bookmark(&self.authority, tweet)?;
        self.submit(self.encoder.bookmark_tweet(bookmark, self.authority, *tweet))
            .await
    }

    pub async fn unbookmark_tweet(&self, tweet: &Pubkey) -> Result<String> {
        let (bookmark, _) = self.deriver.bookmark(&self.authority, tweet)?;
        self.submit(self.encoder.unbookmark_tweet(bookmark, self.authority))
            .await
    }

    async fn submit(&self, instruction: Instruction) -> Result<String> {
        let signature = self.sender.send(std::slice::from_ref(&instruction)).await?;
        tracing::debug!(%signature, "transaction submitted");
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use quill_codec::discriminator::DiscriminatorRegistry;
    use quill_types::instruction::Operation;
    use quill_types::DEFAULT_PROGRAM_ID;

    use crate::store::MemoryStore;

    use super::*;

    /// Captures submitted instructions instead of sending them anywhere.
    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<Instruction>>,
    }

    #[async_trait]
    impl TransactionSender for RecordingSender {
        async fn send(&self, instructions: &[Instruction]) -> Result<String> {
            self.sent
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .extend_from_slice(instructions);
            Ok("sig".to_owned())
        }
    }

    fn key_of(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn client() -> QuillClient<MemoryStore, RecordingSender> {
        QuillClient::new(
            MemoryStore::new(),
            RecordingSender::default(),
            DEFAULT_PROGRAM_ID,
            key_of(0xA0),
        )
    }

    fn last_sent(c: &QuillClient<MemoryStore, RecordingSender>) -> Instruction {
        c.sender
            .sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
            .expect("an instruction was sent")
    }

    #[tokio::test]
    async fn test_like_targets_derived_address() {
        let c = client();
        let tweet = key_of(0xB0);
        c.like_tweet(&tweet).await.expect("like");

        let ix = last_sent(&c);
        let (expected, _) = c.deriver().like(c.authority(), &tweet).expect("derive");
        assert_eq!(ix.accounts[0].pubkey, expected);
        assert_eq!(
            ix.data[..8],
            DiscriminatorRegistry::global().operation(Operation::LikeTweet)
        );
    }

    #[tokio::test]
    async fn test_self_follow_rejected() {
        let c = client();
        let me = *c.authority();
        assert!(matches!(
            c.follow_user(&me).await,
            Err(ClientError::SelfFollow)
        ));
    }

    #[tokio::test]
    async fn test_post_tweet_submits_and_reads_back() {
        let c = client();
        c.post_tweet("hello", 1_700_000_000, None).await.expect("post");
        let ix = last_sent(&c);
        assert_eq!(
            ix.data[..8],
            DiscriminatorRegistry::global().operation(Operation::PostTweet)
        );
        // The store is still empty: writes only go through the sender.
        assert!(c.fetch_tweets().await.expect("fetch").is_empty());
    }
}
