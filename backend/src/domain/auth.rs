//! Sign-in primitives: the identity token handed over by the client and the
//! identity an identity provider vouches for.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, Email, UserId, WebUrl};

/// Domain error returned when a sign-in token is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityTokenError {
    /// Token was missing or blank.
    Empty,
}

impl fmt::Display for IdentityTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identity token must not be empty"),
        }
    }
}

impl std::error::Error for IdentityTokenError {}

/// Bearer token obtained by the client from the identity provider.
///
/// The secret is wiped from memory on drop and never printed.
///
/// # Examples
/// ```
/// use jam_backend::domain::IdentityToken;
///
/// let token = IdentityToken::new(" eyJhbGciOi ").expect("non-empty token");
/// assert_eq!(token.expose(), "eyJhbGciOi");
/// assert!(IdentityToken::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityToken(Zeroizing<String>);

impl IdentityToken {
    /// Validate and wrap a raw token.
    pub fn new(raw: &str) -> Result<Self, IdentityTokenError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityTokenError::Empty);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token for forwarding to the identity provider.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityToken(..)")
    }
}

/// Identity confirmed by an identity provider.
///
/// ## Invariants
/// - `provider` and `subject` together identify one external account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub provider: String,
    pub subject: String,
    pub email: Email,
    pub display_name: DisplayName,
    pub photo_url: Option<WebUrl>,
}

impl VerifiedIdentity {
    /// Profile id owned by this external account.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_provider_subject(&self.provider, &self.subject)
    }
}
