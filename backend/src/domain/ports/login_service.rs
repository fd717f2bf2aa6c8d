//! Driving port for sign-in.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange an identity provider token for a user id without knowing (or
//! importing) the verifier or the profile store.

use async_trait::async_trait;

use crate::domain::{Error, IdentityToken, UserId};

/// Result of a successful sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInOutcome {
    pub user_id: UserId,
    /// Whether the sign-up form still has to be completed.
    pub onboarding_required: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify the token and resolve, or create, the user's profile.
    async fn sign_in(&self, token: &IdentityToken) -> Result<SignInOutcome, Error>;
}
