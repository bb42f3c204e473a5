//! JWS signing.
//!
//! [`JwtSigner`] is the production [`TokenSigner`]. The algorithm family
//! decides how the secret is read:
//!
//! | Algorithms                  | Secret format          |
//! |-----------------------------|------------------------|
//! | `HS256`, `HS384`, `HS512`   | raw shared secret      |
//! | `RS*`, `PS*`                | RSA private key (PEM)  |
//! | `ES256`, `ES384`            | EC private key (PEM)   |
//! | `EdDSA`                     | Ed25519 key (PEM)      |

use std::str::FromStr;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use tokenmint_core::error::{Result, TokenMintError};
use tokenmint_core::traits::TokenSigner;
use tokenmint_core::types::{Claims, SecretKey};

/// Parses an algorithm name such as `HS256`.
///
/// # Errors
/// `UnsupportedAlgorithm` for unknown names, including `none`.
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    Algorithm::from_str(name).map_err(|_| TokenMintError::UnsupportedAlgorithm(name.to_owned()))
}

fn encoding_key(secret: &SecretKey, algorithm: Algorithm) -> Result<EncodingKey> {
    if secret.is_empty() {
        return Err(TokenMintError::InvalidKey("secret key must not be empty".into()));
    }

    let pem = secret.as_bytes();
    let key = match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Ok(EncodingKey::from_secret(pem));
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => EncodingKey::from_rsa_pem(pem),
        Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(pem),
        Algorithm::EdDSA => EncodingKey::from_ed_pem(pem),
    };

    // The parser error never includes key material
    key.map_err(|e| TokenMintError::InvalidKey(format!("{:?} key could not be read: {}", algorithm, e)))
}

/// Signs claims as a compact JWS using `jsonwebtoken`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JwtSigner;

impl JwtSigner {
    /// Creates a signer.
    pub fn new() -> Self {
        Self
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, claims: &Claims, secret: &SecretKey, algorithm: &str) -> Result<String> {
        let algorithm = parse_algorithm(algorithm)?;
        let key = encoding_key(secret, algorithm)?;

        encode(&Header::new(algorithm), claims, &key)
            .map_err(|e| TokenMintError::SigningFailed(e.to_string()))
    }
}
