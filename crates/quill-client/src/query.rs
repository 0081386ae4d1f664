//! Typed queries over the account store.
//!
//! A collection fetch asks the store for every entry carrying the kind's
//! discriminator, then decodes each one. An entry that fails to decode is
//! logged and skipped so one corrupt account cannot take down a whole feed;
//! single-address fetches decode strictly and surface the error.

use quill_codec::discriminator::DiscriminatorRegistry;
use quill_codec::record::AccountRecord;
use quill_types::record::RecordKind;
use quill_types::Pubkey;

use crate::store::{AccountStore, StoredAccount};
use crate::Result;

/// Read-side client for one program's accounts.
#[derive(Debug)]
pub struct QueryClient<S> {
    store: S,
    program_id: Pubkey,
}

impl<S: AccountStore> QueryClient<S> {
    pub fn new(store: S, program_id: Pubkey) -> Self {
        Self { store, program_id }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Raw entries of `kind`, undecoded.
    pub async fn fetch_raw(&self, kind: RecordKind) -> Result<Vec<StoredAccount>> {
        let prefix = DiscriminatorRegistry::global().account(kind);
        self.store.accounts_with_prefix(&self.program_id, prefix).await
    }

    /// Every decodable record of type `R`, keyed by address.
    ///
    /// Entries that carry the right discriminator but fail field decode are
    /// skipped with a warning; the fetch only fails if the store itself
    /// does.
    pub async fn fetch_all<R: AccountRecord>(&self) -> Result<Vec<(Pubkey, R)>> {
        let entries = self.fetch_raw(R::KIND).await?;
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            match R::decode(&entry.data) {
                Ok(record) => records.push((entry.address, record)),
                Err(error) => tracing::warn!(
                    address = %entry.address,
                    kind = ?R::KIND,
                    %error,
                    "skipping undecodable account"
                ),
            }
        }
        Ok(records)
    }

    /// The record of type `R` at `address`, or `None` if absent.
    ///
    /// Unlike [`fetch_all`](Self::fetch_all), decode failures here are
    /// surfaced: the caller named a specific account and should see why it
    /// is unusable.
    pub async fn fetch_at<R: AccountRecord>(&self, address: &Pubkey) -> Result<Option<R>> {
        match self.store.account(address).await? {
            None => Ok(None),
            Some(entry) => Ok(Some(R::decode(&entry.data)?)),
        }
    }
}
