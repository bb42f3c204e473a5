//! # Tokenmint Issuer
//!
//! Decides whether a signing request may be served from cache and runs
//! the request through cache lookup, signing, and cache write-back.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tokenmint_issuer::{TokenIssuer, IssuerConfig};
//!
//! let issuer = TokenIssuer::new(cache.backend(), Arc::new(JwtSigner), IssuerConfig::default());
//! let issued = issuer.issue(request).await?;
//! println!("{} (cached: {})", issued.token, issued.cached);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod policy;
pub mod issuer;

pub use policy::is_cacheable;
pub use issuer::{IssuerConfig, TokenIssuer};
