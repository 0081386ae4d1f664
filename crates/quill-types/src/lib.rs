//! # quill-types
//!
//! Shared domain types for the Quill client workspace.
//!
//! Quill is a client for a microblogging program deployed on a Solana-style
//! runtime. This crate holds the vocabulary every other crate speaks:
//!
//! - [`record`] — the six decoded account record types and [`record::RecordKind`]
//! - [`instruction`] — the nine program operations and the instruction value
//!   types handed to the transaction-submission collaborator
//!
//! Raw byte buffers never appear in these types; encoding and decoding live
//! in `quill-codec`.

pub mod instruction;
pub mod record;

pub use solana_pubkey::Pubkey;

/// Length of an account or instruction discriminator in bytes.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Length of a public key / derived address in bytes.
pub const PUBKEY_LEN: usize = 32;

/// The deployed Quill program.
///
/// Passed explicitly to the address deriver and client at construction; no
/// code in this workspace reads it implicitly.
pub const DEFAULT_PROGRAM_ID: Pubkey =
    solana_pubkey::pubkey!("5S7sfpY15KPmL5SfQ3PM81mzeoig8uXWtdwEL2sLq67X");

/// The runtime's system program, referenced by every account-creating
/// instruction.
pub const SYSTEM_PROGRAM_ID: Pubkey =
    solana_pubkey::pubkey!("11111111111111111111111111111111");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_id_round_trips_base58() {
        assert_eq!(
            DEFAULT_PROGRAM_ID.to_string(),
            "5S7sfpY15KPmL5SfQ3PM81mzeoig8uXWtdwEL2sLq67X"
        );
    }

    #[test]
    fn test_system_program_is_all_zeroes() {
        assert_eq!(SYSTEM_PROGRAM_ID.to_bytes(), [0u8; PUBKEY_LEN]);
    }
}
