//! Request orchestration.
//!
//! Per request:
//!
//! 1. Normalize the algorithm name.
//! 2. Apply the cacheability policy.
//! 3. If cacheable, derive the cache key once from the payload as received
//!    and try the cache. A hit is returned as is, without re-signing.
//! 4. Inject `iat` (if absent) and `exp` (if requested and absent), then sign.
//! 5. If cacheable, store the token under the key from step 3.
//!
//! Signing failures are returned to the caller and never cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, instrument};

use tokenmint_core::constants::{
    CLAIM_EXPIRATION, CLAIM_ISSUED_AT, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_TOKEN_EXPIRY_SECONDS,
};
use tokenmint_core::error::{Result, TokenMintError};
use tokenmint_core::traits::{CacheBackend, TokenSigner};
use tokenmint_core::types::{Claims, IssuedToken, SigningRequest};
use tokenmint_crypto::derive_cache_key;

use crate::policy::is_cacheable;

/// Issuer settings.
#[derive(Clone, Debug)]
pub struct IssuerConfig {
    /// How long a cached token is served. Independent of its `exp`.
    pub cache_ttl: Duration,
    /// Lifetime written into an injected `exp`.
    pub token_expiry: Duration,
    /// When false every request is signed fresh.
    pub caching_enabled: bool,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
            token_expiry: Duration::from_secs(DEFAULT_TOKEN_EXPIRY_SECONDS),
            caching_enabled: true,
        }
    }
}

/// Issues tokens, serving repeats from the cache where safe.
///
/// Holds no per-request state; one instance serves all concurrent requests.
pub struct TokenIssuer {
    cache: Arc<dyn CacheBackend>,
    signer: Arc<dyn TokenSigner>,
    config: IssuerConfig,
}

impl TokenIssuer {
    /// Creates an issuer over a cache backend and a signer.
    pub fn new(
        cache: Arc<dyn CacheBackend>,
        signer: Arc<dyn TokenSigner>,
        config: IssuerConfig,
    ) -> Self {
        Self { cache, signer, config }
    }

    /// Issues a token for `request`.
    ///
    /// # Errors
    /// Signing errors, or `ConfigError` when the expiry overflows `exp`.
    /// Cache faults are absorbed by the backend.
    #[instrument(skip_all, fields(algorithm = %request.options.algorithm))]
    pub async fn issue(&self, request: SigningRequest) -> Result<IssuedToken> {
        let SigningRequest { secret, payload, options } = request.normalize();

        let cache_key = (self.config.caching_enabled
            && is_cacheable(&payload, options.add_expiration))
        .then(|| derive_cache_key(&secret, &payload, &options.algorithm));

        if let Some(key) = &cache_key {
            if let Some(token) = self.cache.get(key).await {
                debug!(cache_key = %key, backend = self.cache.name(), "Served token from cache");
                return Ok(IssuedToken::from_cache(token));
            }
        }

        let claims = self.stamp_claims(payload, options.add_expiration)?;
        let token = self.signer.sign(&claims, &secret, &options.algorithm)?;

        if let Some(key) = &cache_key {
            self.cache.set(key, &token, self.config.cache_ttl).await;
            debug!(cache_key = %key, backend = self.cache.name(), "Cached fresh token");
        }

        Ok(IssuedToken::fresh(token))
    }

    /// Adds `exp` (when requested) and `iat`, never overwriting caller values.
    ///
    /// # Errors
    /// `ConfigError` when the configured expiry does not fit in a timestamp.
    fn stamp_claims(&self, mut claims: Claims, add_expiration: bool) -> Result<Claims> {
        let now = Utc::now().timestamp();

        if add_expiration && !claims.contains_key(CLAIM_EXPIRATION) {
            let expires_at = i64::try_from(self.config.token_expiry.as_secs())
                .ok()
                .and_then(|expiry| now.checked_add(expiry))
                .ok_or_else(|| {
                    TokenMintError::ConfigError(format!(
                        "token expiry of {}s overflows the exp claim",
                        self.config.token_expiry.as_secs()
                    ))
                })?;
            claims.insert(CLAIM_EXPIRATION.into(), Value::from(expires_at));
        }
        if !claims.contains_key(CLAIM_ISSUED_AT) {
            claims.insert(CLAIM_ISSUED_AT.into(), Value::from(now));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde_json::json;

    use tokenmint_cache::{CacheConfig, MemoryCache, SoftFailStore};
    use tokenmint_core::traits::RemoteStore;
    use tokenmint_core::types::SecretKey;
    use tokenmint_crypto::JwtSigner;

    /// Counts signatures and delegates to the real signer.
    #[derive(Default)]
    struct CountingSigner {
        calls: AtomicUsize,
    }

    impl TokenSigner for CountingSigner {
        fn sign(&self, claims: &Claims, secret: &SecretKey, algorithm: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            JwtSigner.sign(claims, secret, algorithm)
        }
    }

    struct RefusingStore;

    #[async_trait]
    impl RemoteStore for RefusingStore {
        fn name(&self) -> &'static str {
            "refusing"
        }

        async fn ping(&self) -> Result<()> {
            Err(TokenMintError::CacheUnavailable("connection refused".into()))
        }

        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(TokenMintError::CacheUnavailable("connection refused".into()))
        }

        async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
            Err(TokenMintError::CacheUnavailable("connection refused".into()))
        }
    }

    struct Fixture {
        cache: Arc<MemoryCache>,
        signer: Arc<CountingSigner>,
        issuer: TokenIssuer,
    }

    fn fixture(config: IssuerConfig) -> Fixture {
        let cache = Arc::new(MemoryCache::with_config(CacheConfig::default()));
        let signer = Arc::new(CountingSigner::default());
        let issuer = TokenIssuer::new(cache.clone(), signer.clone(), config);
        Fixture { cache, signer, issuer }
    }

    fn request(body: Value, add_expiration: bool) -> SigningRequest {
        SigningRequest::new("s3cret".into(), body.as_object().cloned().unwrap())
            .with_algorithm("HS256")
            .with_add_expiration(add_expiration)
    }

    fn claims_of(token: &str) -> Value {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        decode::<Value>(token, &DecodingKey::from_secret(b"s3cret"), &validation)
            .unwrap()
            .claims
    }

    #[tokio::test]
    async fn test_repeat_request_served_from_cache() {
        let f = fixture(IssuerConfig::default());

        let first = f.issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();
        let second = f.issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.token, second.token);
        assert_eq!(f.signer.calls.load(Ordering::SeqCst), 1);

        let claims = claims_of(&first.token);
        assert_eq!(claims["user"], "alice");
        assert!(claims["iat"].is_i64());
        assert!(claims.get("exp").is_none());
    }

    #[tokio::test]
    async fn test_add_expiration_never_cached() {
        let f = fixture(IssuerConfig::default());

        for _ in 0..3 {
            let issued = f.issuer.issue(request(json!({"user": "alice"}), true)).await.unwrap();
            assert!(!issued.cached);
            let claims = claims_of(&issued.token);
            let iat = claims["iat"].as_i64().unwrap();
            assert_eq!(claims["exp"].as_i64().unwrap(), iat + 3600);
        }

        assert_eq!(f.signer.calls.load(Ordering::SeqCst), 3);
        assert!(f.cache.is_empty());
    }

    #[tokio::test]
    async fn test_caller_timestamps_bypass_cache_and_are_kept() {
        let f = fixture(IssuerConfig::default());
        let body = json!({"user": "alice", "iat": 1_000, "exp": 2_000});

        let first = f.issuer.issue(request(body.clone(), false)).await.unwrap();
        let second = f.issuer.issue(request(body, false)).await.unwrap();

        assert!(!first.cached && !second.cached);
        assert!(f.cache.is_empty());

        let claims = claims_of(&first.token);
        assert_eq!(claims["iat"], 1_000);
        assert_eq!(claims["exp"], 2_000);
    }

    #[tokio::test]
    async fn test_key_derived_from_payload_before_injection() {
        let f = fixture(IssuerConfig::default());
        let body = json!({"user": "alice"});

        let issued = f.issuer.issue(request(body.clone(), false)).await.unwrap();

        let key = derive_cache_key(
            &"s3cret".into(),
            body.as_object().unwrap(),
            "HS256",
        );
        assert_eq!(f.cache.get(key.as_str()), Some(issued.token));
        assert_eq!(f.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_different_secret_is_not_served_other_token() {
        let f = fixture(IssuerConfig::default());
        let body = json!({"user": "alice"}).as_object().cloned().unwrap();

        let mine = f.issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();
        let theirs = f
            .issuer
            .issue(SigningRequest::new("other".into(), body).with_add_expiration(false))
            .await
            .unwrap();

        assert!(!theirs.cached);
        assert_ne!(mine.token, theirs.token);
    }

    #[tokio::test]
    async fn test_signing_error_surfaces_and_is_not_cached() {
        let f = fixture(IssuerConfig::default());

        let err = f
            .issuer
            .issue(request(json!({"user": "alice"}), false).with_algorithm("HS999"))
            .await
            .unwrap_err();
        assert!(matches!(err, TokenMintError::UnsupportedAlgorithm(_)));
        assert!(f.cache.is_empty());

        let err = f
            .issuer
            .issue(SigningRequest::new("".into(), Claims::new()).with_add_expiration(false))
            .await
            .unwrap_err();
        assert!(matches!(err, TokenMintError::InvalidKey(_)));
        assert!(f.cache.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_store_still_signs() {
        let signer = Arc::new(CountingSigner::default());
        let issuer = TokenIssuer::new(
            Arc::new(SoftFailStore::new(RefusingStore)),
            signer.clone(),
            IssuerConfig::default(),
        );

        let first = issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();
        let second = issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();

        assert!(!first.cached && !second.cached);
        assert_eq!(claims_of(&first.token)["user"], "alice");
        assert_eq!(signer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_oversized_expiry_is_config_error() {
        for seconds in [i64::MAX as u64, u64::MAX] {
            let f = fixture(IssuerConfig {
                token_expiry: Duration::from_secs(seconds),
                ..IssuerConfig::default()
            });

            let err = f
                .issuer
                .issue(request(json!({"user": "alice"}), true))
                .await
                .unwrap_err();
            assert!(matches!(err, TokenMintError::ConfigError(_)));
            assert_eq!(f.signer.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_oversized_expiry_unused_without_add_exp() {
        let f = fixture(IssuerConfig {
            token_expiry: Duration::from_secs(u64::MAX),
            ..IssuerConfig::default()
        });

        let issued = f.issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();
        assert!(claims_of(&issued.token).get("exp").is_none());
    }

    #[tokio::test]
    async fn test_caching_disabled() {
        let f = fixture(IssuerConfig {
            caching_enabled: false,
            ..IssuerConfig::default()
        });

        f.issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();
        let second = f.issuer.issue(request(json!({"user": "alice"}), false)).await.unwrap();

        assert!(!second.cached);
        assert!(f.cache.is_empty());
    }

    #[tokio::test]
    async fn test_blank_algorithm_defaults_to_hs256() {
        let f = fixture(IssuerConfig::default());
        let issued = f
            .issuer
            .issue(request(json!({"user": "alice"}), false).with_algorithm("  "))
            .await
            .unwrap();
        assert_eq!(claims_of(&issued.token)["user"], "alice");
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_cache() {
        let f = fixture(IssuerConfig::default());
        let issuer = Arc::new(f.issuer);

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let issuer = Arc::clone(&issuer);
                tokio::spawn(async move {
                    issuer
                        .issue(request(json!({"user": format!("user-{}", i % 4)}), false))
                        .await
                        .unwrap()
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(f.cache.len(), 4);
    }
}
