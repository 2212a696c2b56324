//! Opaque bearer-token generation.
//!
//! Share tokens and company API keys are bearer credentials: possession of
//! the string grants access, so they must be infeasible to guess or
//! enumerate. Tokens are random bytes encoded URL-safe without padding.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

/// Generates a random bearer token with the given prefix.
///
/// `random_bytes` controls the entropy; 32 bytes yields a 43-character
/// encoded suffix (256 bits).
pub fn generate_token(prefix: &str, random_bytes: usize) -> String {
    let mut bytes = vec![0u8; random_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}{}", prefix, URL_SAFE_NO_PAD.encode(&bytes))
}
