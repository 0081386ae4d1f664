//! Shared helpers for the integration tests.

use std::sync::Once;

use quill_types::Pubkey;

/// A deterministic test key filled with one byte value.
pub fn key_of(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

/// Install a tracing subscriber once for the whole test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
