//! The remote account store seam.
//!
//! The store is an external collaborator: a key-value space of raw account
//! bytes supporting prefix-filtered enumeration and single-address fetch.
//! Both operations are read-only. Remote failures pass through unchanged;
//! retry policy, if any, belongs to the caller.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use quill_types::{Pubkey, DISCRIMINATOR_LEN};

use crate::Result;

/// One raw entry from the store: its address and its full data, the
/// discriminator prefix included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAccount {
    pub address: Pubkey,
    pub data: Vec<u8>,
}

/// Read-only access to the remote account store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Every account owned by `program_id` whose leading bytes equal
    /// `prefix`. The result may be empty and is unordered.
    async fn accounts_with_prefix(
        &self,
        program_id: &Pubkey,
        prefix: [u8; DISCRIMINATOR_LEN],
    ) -> Result<Vec<StoredAccount>>;

    /// The account at `address`, or `None` if it does not exist.
    async fn account(&self, address: &Pubkey) -> Result<Option<StoredAccount>>;
}

/// In-memory store for tests and offline development.
///
/// Holds the accounts of a single program; the `program_id` argument to
/// [`AccountStore::accounts_with_prefix`] is not checked.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the raw bytes at `address`.
    pub fn insert(&self, address: Pubkey, data: Vec<u8>) {
        self.lock().insert(address, data);
    }

    /// Remove the account at `address`, if present.
    pub fn remove(&self, address: &Pubkey) {
        self.lock().remove(address);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Pubkey, Vec<u8>>> {
        self.accounts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn accounts_with_prefix(
        &self,
        _program_id: &Pubkey,
        prefix: [u8; DISCRIMINATOR_LEN],
    ) -> Result<Vec<StoredAccount>> {
        Ok(self
            .lock()
            .iter()
            .filter(|(_, data)| data.len() >= DISCRIMINATOR_LEN && data[..DISCRIMINATOR_LEN] == prefix)
            .map(|(address, data)| StoredAccount {
                address: *address,
                data: data.clone(),
            })
            .collect())
    }

    async fn account(&self, address: &Pubkey) -> Result<Option<StoredAccount>> {
        Ok(self.lock().get(address).map(|data| StoredAccount {
            address: *address,
            data: data.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use quill_types::DEFAULT_PROGRAM_ID;

    use super::*;

    fn key_of(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[tokio::test]
    async fn test_prefix_filter() {
        let store = MemoryStore::new();
        store.insert(key_of(1), vec![0xAA; 16]);
        store.insert(key_of(2), vec![0xBB; 16]);
        store.insert(key_of(3), vec![0xAA; 4]); // shorter than a prefix

        let hits = store
            .accounts_with_prefix(&DEFAULT_PROGRAM_ID, [0xAA; 8])
            .await
            .expect("query");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].address, key_of(1));
    }

    #[tokio::test]
    async fn test_single_fetch_and_remove() {
        let store = MemoryStore::new();
        let addr = key_of(7);
        store.insert(addr, vec![1, 2, 3]);
        assert!(store.account(&addr).await.expect("fetch").is_some());
        store.remove(&addr);
        assert!(store.account(&addr).await.expect("fetch").is_none());
    }
}
