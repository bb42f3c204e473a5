//! Cache key derivation.
//!
//! A cache key is a digest of the canonical envelope
//!
//! ```text
//! {"algorithm": <name>, "payload": <payload without iat/exp>, "secret": <hashed secret prefix>}
//! ```
//!
//! The secret only enters the envelope through a truncated, domain-separated
//! hash, and the envelope itself is hashed again, so the key never contains
//! the secret. Two requests that differ only in their secret still get
//! different keys because the hashed prefix differs.

use serde_json::{json, Value};

use tokenmint_core::constants::{
    CACHE_KEY_PREFIX, DOMAIN_CACHE_KEY, DOMAIN_SECRET_FINGERPRINT, SECRET_FINGERPRINT_HEX_LEN,
};
use tokenmint_core::types::{CacheKey, Claims, SecretKey};

use crate::canonical::{canonical_json, strip_timestamps};
use crate::hash::sha3_256;

/// Returns the truncated hex fingerprint of a secret.
pub fn hash_secret(secret: &SecretKey) -> String {
    let digest = sha3_256(DOMAIN_SECRET_FINGERPRINT, secret.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(SECRET_FINGERPRINT_HEX_LEN);
    encoded
}

/// Derives the cache key for a signing request.
///
/// `iat` and `exp` are ignored, object key order is ignored, and the
/// result is stable across process restarts.
pub fn derive_cache_key(secret: &SecretKey, payload: &Claims, algorithm: &str) -> CacheKey {
    let envelope = json!({
        "algorithm": algorithm,
        "payload": Value::Object(strip_timestamps(payload)),
        "secret": hash_secret(secret),
    });

    let digest = sha3_256(DOMAIN_CACHE_KEY, canonical_json(&envelope).as_bytes());
    CacheKey::new(format!("{}{}", CACHE_KEY_PREFIX, hex::encode(digest)))
}
