//! # quill-client
//!
//! Remote-store access for the Quill program.
//!
//! This crate owns the read path from the remote account store to typed
//! records, and the seam through which writes leave for the wallet:
//!
//! - [`store`] — the [`store::AccountStore`] trait (prefix-filtered
//!   enumeration + single-address fetch) and an in-memory implementation
//!   for tests
//! - [`rpc`] — JSON-RPC implementation of the store trait
//!   (`getProgramAccounts` with a memcmp filter at offset 0,
//!   `getAccountInfo`)
//! - [`query`] — typed collection fetch; undecodable entries are skipped
//!   with a warning rather than failing the whole fetch
//! - [`client`] — high-level client composing derivation, encoding, query
//!   and the [`client::TransactionSender`] collaborator
//!
//! The query layer never retries and never caches; callers impose their own
//! deadlines and re-query to observe remote mutations.

pub mod client;
pub mod query;
pub mod rpc;
pub mod store;

use quill_codec::CodecError;

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP or connection failure reaching the remote store.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote store returned a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The remote store's response did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Encoding, decoding or address derivation failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A follow operation targeted the authority itself.
    #[error("cannot follow yourself")]
    SelfFollow,
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Rpc {
            code: -32602,
            message: "invalid params".into(),
        };
        assert_eq!(err.to_string(), "rpc error -32602: invalid params");
    }

    #[test]
    fn test_codec_error_converts() {
        let err: ClientError = CodecError::OutOfRange { value: i64::MAX }.into();
        assert!(matches!(err, ClientError::Codec(_)));
    }
}
