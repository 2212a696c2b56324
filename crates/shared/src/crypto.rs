//! Cryptographic utilities for credential hashing.
//!
//! Company API keys and share-link passwords are stored as SHA-256 hex
//! digests. The plaintext value is never persisted or logged.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verifies a plaintext secret against a stored SHA-256 hex digest.
pub fn verify_sha256(secret: &str, stored_hash: &str) -> bool {
    sha256_hex(secret) == stored_hash
}

/// Extracts the prefix from a company API key (first 8 characters after "cpk_").
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    if key.starts_with("cpk_") && key.len() >= 12 {
        Some(&key[4..12])
    } else {
        None
    }
}
