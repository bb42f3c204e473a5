//! Hashing utilities with domain separation.
//!
//! This module provides SHA3-256 with domain separation so the hashed
//! secret and the cache key digest can never produce colliding outputs.
//!
//! ## Domain Separation
//!
//! Every call prefixes the input with its domain:
//!
//! ```text
//! output = SHA3-256(len(domain) || domain || input)
//! ```

use sha3::{Digest, Sha3_256};

/// Output size of SHA3-256 in bytes.
pub const SHA3_256_OUTPUT_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// SHA3-256 FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes SHA3-256 with domain separation.
///
/// # Arguments
///
/// * `domain` - Domain separator bytes (unique per use case)
/// * `input` - Input data to hash
///
/// # Example
///
/// ```rust
/// use tokenmint_crypto::sha3_256;
/// use tokenmint_core::constants::DOMAIN_CACHE_KEY;
///
/// let digest = sha3_256(DOMAIN_CACHE_KEY, b"envelope");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha3_256(domain: &[u8], input: &[u8]) -> [u8; SHA3_256_OUTPUT_SIZE] {
    let mut hasher = Sha3_256::new();

    // Domain separation: prepend domain with length prefix
    hasher.update((domain.len() as u32).to_le_bytes());
    hasher.update(domain);

    hasher.update(input);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenmint_core::constants::*;

    #[test]
    fn test_sha3_256_deterministic() {
        let output1 = sha3_256(b"domain", b"input");
        let output2 = sha3_256(b"domain", b"input");

        assert_eq!(output1, output2);
    }

    #[test]
    fn test_sha3_256_domain_separation() {
        let domain1 = sha3_256(b"domain1", b"input");
        let domain2 = sha3_256(b"domain2", b"input");

        assert_ne!(domain1, domain2);
    }

    #[test]
    fn test_empty_domain_differs_from_raw_sha3() {
        // Length prefix means even an empty domain changes the digest
        let raw: [u8; 32] = Sha3_256::digest(b"input").into();
        assert_ne!(sha3_256(b"", b"input"), raw);
    }

    #[test]
    fn test_tokenmint_domains_produce_different_outputs() {
        let input = [0u8; 32];

        let secret_hash = sha3_256(DOMAIN_SECRET_FINGERPRINT, &input);
        let key_hash = sha3_256(DOMAIN_CACHE_KEY, &input);

        assert_ne!(secret_hash, key_hash);
    }
}
