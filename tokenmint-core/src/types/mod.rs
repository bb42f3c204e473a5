//! Domain types for tokenmint.
//!
//! - [`SecretKey`]: Signing key material, redacted in `Debug` and zeroized on drop
//! - [`SigningRequest`]: Secret, payload, and options for one token
//! - [`CacheKey`]: Secret-safe fingerprint of a request
//! - [`IssuedToken`]: Signed token plus where it came from

mod secret;
mod request;
mod token;

pub use secret::*;
pub use request::*;
pub use token::*;
