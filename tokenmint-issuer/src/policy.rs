//! Cacheability policy.
//!
//! A token that embeds a wall-clock timestamp chosen by the caller, or an
//! `exp` chosen by us, is unique per call. Those requests bypass the cache
//! entirely: no fingerprint, no read, no write.

use tokenmint_core::constants::TIMESTAMP_CLAIMS;
use tokenmint_core::types::Claims;

/// Returns true if the signed result of this request may be cached.
///
/// False when `add_expiration` is set or the payload already carries `iat` or `exp`.
pub fn is_cacheable(payload: &Claims, add_expiration: bool) -> bool {
    !add_expiration && !TIMESTAMP_CLAIMS.iter().any(|claim| payload.contains_key(*claim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"user": "alice"}), false, true ; "plain payload")]
    #[test_case(json!({}), false, true ; "empty payload")]
    #[test_case(json!({"user": "alice"}), true, false ; "add expiration")]
    #[test_case(json!({"iat": 1_700_000_000}), false, false ; "caller iat")]
    #[test_case(json!({"exp": 1_700_003_600}), false, false ; "caller exp")]
    #[test_case(json!({"nested": {"iat": 1}}), false, true ; "nested iat is just data")]
    #[test_case(json!({"iat": null}), false, false ; "null iat still counts")]
    fn test_is_cacheable(payload: Value, add_expiration: bool, expected: bool) {
        let payload = payload.as_object().cloned().unwrap();
        assert_eq!(is_cacheable(&payload, add_expiration), expected);
    }
}
