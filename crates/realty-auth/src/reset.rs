//! Password reset tokens.
//!
//! The raw token is only ever sent to the user by email. The database keeps
//! its SHA-256 digest, so a leaked table cannot be replayed.

use sha2::{Digest, Sha256};

/// Generates a random 32-byte token encoded as 64 hex characters.
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// Returns the hex-encoded SHA-256 digest stored for `token`.
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
