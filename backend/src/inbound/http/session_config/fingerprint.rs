//! Session key fingerprinting.
//!
//! Start-up logs print a truncated SHA-256 digest of the signing key so
//! operators can tell which key is live after a rotation without the key
//! itself appearing anywhere.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of SHA-256 over the key's signing half, hex encoded.
///
/// ```rust
/// use actix_web::cookie::Key;
/// use jam_backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
