//! # Tokenmint Core
//!
//! Core types, errors, and traits for the tokenmint token issuing service.
//!
//! This crate provides the foundational building blocks used by all other tokenmint crates:
//!
//! - **Types**: Signing requests, secret keys, cache keys, and issued tokens
//! - **Errors**: Error hierarchy split into input, signing, and cache faults
//! - **Constants**: Defaults for algorithms, TTLs, and cache sizing
//! - **Traits**: Seams for cache backends, remote stores, and token signers
//!
//! ## Example
//!
//! ```rust
//! use tokenmint_core::{SigningRequest, SecretKey, Claims};
//!
//! let mut payload = Claims::new();
//! payload.insert("user".into(), "alice".into());
//!
//! let request = SigningRequest::new(SecretKey::new("s3cret"), payload)
//!     .with_add_expiration(false);
//! assert_eq!(request.options.algorithm, "HS256");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, TokenMintError};
pub use traits::*;
pub use types::*;
