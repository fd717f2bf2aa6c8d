//! Port for verifying identity tokens with an identity provider.

use async_trait::async_trait;

use crate::domain::{DisplayName, Email, IdentityToken, VerifiedIdentity};

use super::define_port_error;

/// Provider name recorded for fixture sign-ins.
pub const FIXTURE_PROVIDER: &str = "fixture";

define_port_error! {
    /// Errors raised while verifying an identity token.
    pub enum IdentityVerifierError {
        /// The provider refused the token (expired, forged or for another
        /// audience).
        Rejected { message: String } => "identity token rejected: {message}",
        /// The provider could not be reached.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// The provider answered with a payload that could not be understood.
        Malformed { message: String } => "identity provider response malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token` and return the identity it proves.
    async fn verify(&self, token: &IdentityToken)
    -> Result<VerifiedIdentity, IdentityVerifierError>;
}

/// Development verifier accepting `fixture:<subject>:<email>` tokens.
///
/// The display name defaults to the email's local part.
///
/// # Examples
/// ```
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// use jam_backend::domain::IdentityToken;
/// use jam_backend::domain::ports::{FixtureIdentityVerifier, IdentityVerifier};
///
/// let token = IdentityToken::new("fixture:42:ada@example.com").expect("token");
/// let identity = FixtureIdentityVerifier.verify(&token).await.expect("accepted");
/// assert_eq!(identity.subject, "42");
/// assert_eq!(identity.display_name.as_ref(), "ada");
/// # });
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityVerifier;

#[async_trait]
impl IdentityVerifier for FixtureIdentityVerifier {
    async fn verify(
        &self,
        token: &IdentityToken,
    ) -> Result<VerifiedIdentity, IdentityVerifierError> {
        let mut parts = token.expose().splitn(3, ':');
        let (Some(FIXTURE_PROVIDER), Some(subject), Some(email)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(IdentityVerifierError::rejected(
                "expected fixture:<subject>:<email>",
            ));
        };
        if subject.is_empty() {
            return Err(IdentityVerifierError::rejected("fixture subject is empty"));
        }
        let email = Email::new(email)
            .map_err(|err| IdentityVerifierError::rejected(err.to_string()))?;
        Ok(VerifiedIdentity {
            provider: FIXTURE_PROVIDER.to_owned(),
            subject: subject.to_owned(),
            display_name: DisplayName::from_email(&email),
            email,
            photo_url: None,
        })
    }
}
