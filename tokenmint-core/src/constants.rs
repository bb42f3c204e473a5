//! Service constants for tokenmint.
//!
//! Defaults mirror the behaviour of the public `/generate_jwt` contract:
//! HS256 signing, injected expiry of one hour, and a one hour cache TTL.

// ═══════════════════════════════════════════════════════════════════════════════
// SIGNING DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Algorithm used when a request does not name one.
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Whether `exp` is injected when a request does not say otherwise.
pub const DEFAULT_ADD_EXPIRATION: bool = true;

/// Lifetime of an injected `exp` claim, in seconds.
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: u64 = 3600;

// ═══════════════════════════════════════════════════════════════════════════════
// CLAIM NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Issued-at claim.
pub const CLAIM_ISSUED_AT: &str = "iat";

/// Expiration claim.
pub const CLAIM_EXPIRATION: &str = "exp";

/// Claims whose value depends on the wall clock.
/// A payload carrying any of these is never cached and they never
/// take part in a cache key.
pub const TIMESTAMP_CLAIMS: [&str; 2] = [CLAIM_ISSUED_AT, CLAIM_EXPIRATION];

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE SIZING
// ═══════════════════════════════════════════════════════════════════════════════

/// TTL for cached tokens, in seconds. Independent of any `exp` claim.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// Maximum number of entries held by the in-process cache.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Number of entries dropped in one pass once the in-process cache is full.
pub const DEFAULT_EVICTION_BATCH: usize = 100;

/// Timeout for each external store operation and for the startup probe, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 500;

// ═══════════════════════════════════════════════════════════════════════════════
// FINGERPRINTS
// ═══════════════════════════════════════════════════════════════════════════════
// Each SHA3 invocation uses its own domain separator so a hashed secret
// can never be confused with a cache key digest.

/// Domain separator for hashing the secret key.
pub const DOMAIN_SECRET_FINGERPRINT: &[u8] = b"TOKENMINT_SECRET_V1";

/// Domain separator for hashing the canonical request envelope.
pub const DOMAIN_CACHE_KEY: &[u8] = b"TOKENMINT_CACHE_KEY_V1";

/// Number of hex characters of the hashed secret kept in the envelope.
pub const SECRET_FINGERPRINT_HEX_LEN: usize = 16;

/// Prefix of every cache key. Bump the version when the envelope format changes.
pub const CACHE_KEY_PREFIX: &str = "tokenmint:v1:";

// ═══════════════════════════════════════════════════════════════════════════════
// SERVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;
