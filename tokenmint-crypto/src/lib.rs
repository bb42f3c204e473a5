//! # Tokenmint Cryptography
//!
//! Hashing and signing primitives for tokenmint.
//!
//! This crate provides:
//!
//! - **Hash**: SHA3-256 with domain separation
//! - **Canonical JSON**: Order-independent serialization of payloads
//! - **Fingerprint**: Secret-safe cache keys for signing requests
//! - **Signer**: [`JwtSigner`], the JWS implementation of `TokenSigner`
//!
//! ## Security Properties
//!
//! - Cache keys embed only a truncated, domain-separated hash of the secret
//! - Fingerprints are deterministic across processes (no random seeds)
//!
//! ## Example
//!
//! ```rust
//! use tokenmint_core::{Claims, SecretKey};
//! use tokenmint_crypto::derive_cache_key;
//!
//! let mut payload = Claims::new();
//! payload.insert("user".into(), "alice".into());
//!
//! let secret = SecretKey::new("s3cret");
//! let key = derive_cache_key(&secret, &payload, "HS256");
//! assert!(!key.as_str().contains("s3cret"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod hash;
pub mod canonical;
pub mod fingerprint;
pub mod signer;

// Re-export main functions at crate root
pub use hash::sha3_256;
pub use canonical::{canonical_json, strip_timestamps};
pub use fingerprint::{derive_cache_key, hash_secret};
pub use signer::{parse_algorithm, JwtSigner};
