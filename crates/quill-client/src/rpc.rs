//! JSON-RPC implementation of the account store.
//!
//! Speaks the runtime's standard node API: `getProgramAccounts` with a
//! base58 memcmp filter at offset 0 for prefix enumeration, and
//! `getAccountInfo` for single fetches. Account data travels base64-encoded
//! and is decoded back to raw bytes before crossing the [`AccountStore`]
//! boundary.

use std::str::FromStr;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use quill_types::{Pubkey, DISCRIMINATOR_LEN};

use crate::store::{AccountStore, StoredAccount};
use crate::{ClientError, Result};

/// Configuration for the RPC store.
#[derive(Clone, Debug)]
pub struct RpcConfig {
    /// Node endpoint URL.
    pub url: String,
    /// Commitment level sent with every query.
    pub commitment: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.devnet.solana.com".to_owned(),
            commitment: "confirmed".to_owned(),
        }
    }
}

/// An [`AccountStore`] backed by a JSON-RPC node.
#[derive(Debug)]
pub struct RpcStore {
    http: reqwest::Client,
    config: RpcConfig,
}

impl RpcStore {
    pub fn new(config: RpcConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, url = %self.config.url, "rpc request");
        let response = self
            .http
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let envelope: RpcEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        if let Some(error) = envelope.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| ClientError::InvalidResponse("missing result".to_owned()))
    }
}

#[async_trait]
impl AccountStore for RpcStore {
    async fn accounts_with_prefix(
        &self,
        program_id: &Pubkey,
        prefix: [u8; DISCRIMINATOR_LEN],
    ) -> Result<Vec<StoredAccount>> {
        let params = serde_json::json!([
            program_id.to_string(),
            {
                "encoding": "base64",
                "commitment": self.config.commitment,
                "filters": [
                    { "memcmp": { "offset": 0, "bytes": bs58::encode(prefix).into_string() } }
                ],
            }
        ]);
        let entries: Vec<RpcKeyedAccount> = self.call("getProgramAccounts", params).await?;
        entries.into_iter().map(parse_keyed_account).collect()
    }

    async fn account(&self, address: &Pubkey) -> Result<Option<StoredAccount>> {
        let params = serde_json::json!([
            address.to_string(),
            { "encoding": "base64", "commitment": self.config.commitment }
        ]);
        let response: WithContext<Option<RpcAccount>> =
            self.call("getAccountInfo", params).await?;
        match response.value {
            None => Ok(None),
            Some(account) => Ok(Some(StoredAccount {
                address: *address,
                data: decode_account_data(&account)?,
            })),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct RpcKeyedAccount {
    pubkey: String,
    account: RpcAccount,
}

/// Account body as the node returns it; `data` is `[payload, encoding]`.
#[derive(Debug, Deserialize)]
struct RpcAccount {
    data: (String, String),
}

fn parse_keyed_account(entry: RpcKeyedAccount) -> Result<StoredAccount> {
    let address = Pubkey::from_str(&entry.pubkey)
        .map_err(|e| ClientError::InvalidResponse(format!("bad pubkey {}: {e}", entry.pubkey)))?;
    Ok(StoredAccount {
        address,
        data: decode_account_data(&entry.account)?,
    })
}

fn decode_account_data(account: &RpcAccount) -> Result<Vec<u8>> {
    let (payload, encoding) = &account.data;
    if encoding != "base64" {
        return Err(ClientError::InvalidResponse(format!(
            "unexpected account encoding {encoding:?}"
        )));
    }
    BASE64
        .decode(payload)
        .map_err(|e| ClientError::InvalidResponse(format!("bad base64 account data: {e}")))
}
