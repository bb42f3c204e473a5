//! Secret key material.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key material a token is signed with.
///
/// For HMAC algorithms this is the raw shared secret; for asymmetric
/// algorithms it is a PEM-encoded private key. The value is zeroized when
/// dropped and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    /// Wraps key material.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the key material.
    ///
    /// # Security
    /// Do not log or persist the returned value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the key material as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns true if no key material was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

impl From<String> for SecretKey {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for SecretKey {
    fn from(secret: &str) -> Self {
        Self(secret.to_owned())
    }
}
