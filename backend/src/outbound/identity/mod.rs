//! Identity provider outbound adapters.
//!
//! This module provides an HTTP implementation of the `IdentityVerifier`
//! port that asks the provider's token-info endpoint to vouch for an ID
//! token.

mod dto;
mod http_verifier;

pub use http_verifier::{DEFAULT_PROVIDER, TokenInfoVerifier};
