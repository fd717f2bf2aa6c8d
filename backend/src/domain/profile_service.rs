//! Sign-in and profile services.
//!
//! Sign-in verifies the identity token, then resolves the profile keyed by
//! the provider subject. The first sign-in writes a skeleton profile that
//! the sign-up form completes later.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, IdentityVerifier, IdentityVerifierError,
    LikeRepository, LikeRepositoryError, LoginService, ProfileCommand, ProfileOverview,
    ProfileQuery, SignInOutcome, UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{Error, IdentityToken, ProfileChanges, SignUpDetails, UserId, UserProfile};

fn map_profile_error(error: UserProfileRepositoryError) -> Error {
    match error {
        UserProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        UserProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

fn map_verifier_error(error: IdentityVerifierError) -> Error {
    match error {
        IdentityVerifierError::Rejected { message } => {
            Error::unauthorized(format!("sign-in failed: {message}"))
        }
        IdentityVerifierError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityVerifierError::Malformed { message } => {
            Error::internal(format!("identity provider response malformed: {message}"))
        }
    }
}

fn map_like_error(error: LikeRepositoryError) -> Error {
    match error {
        LikeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("like repository unavailable: {message}"))
        }
        other => Error::internal(format!("like repository error: {other}")),
    }
}

fn map_application_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("application repository unavailable: {message}"))
        }
        other => Error::internal(format!("application repository error: {other}")),
    }
}

fn profile_not_found(user_id: UserId) -> Error {
    Error::not_found(format!("profile {user_id} not found"))
}

/// Profile service implementing [`LoginService`], [`ProfileCommand`] and
/// [`ProfileQuery`].
#[derive(Clone)]
pub struct ProfileService<U, L, A, V: ?Sized> {
    profiles: Arc<U>,
    likes: Arc<L>,
    applications: Arc<A>,
    verifier: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<U, L, A, V: ?Sized> ProfileService<U, L, A, V> {
    /// Create a new service with the given collaborators.
    pub fn new(
        profiles: Arc<U>,
        likes: Arc<L>,
        applications: Arc<A>,
        verifier: Arc<V>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            likes,
            applications,
            verifier,
            clock,
        }
    }
}

impl<U, L, A, V: ?Sized> ProfileService<U, L, A, V>
where
    U: UserProfileRepository,
{
    async fn existing_profile(&self, user_id: UserId) -> Result<UserProfile, Error> {
        self.profiles
            .find_by_id(&user_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| profile_not_found(user_id))
    }

    async fn store(&self, profile: UserProfile) -> Result<UserProfile, Error> {
        self.profiles
            .save(&profile)
            .await
            .map_err(map_profile_error)?;
        Ok(profile)
    }
}

#[async_trait]
impl<U, L, A, V: ?Sized> LoginService for ProfileService<U, L, A, V>
where
    U: UserProfileRepository,
    L: LikeRepository,
    A: ApplicationRepository,
    V: IdentityVerifier,
{
    async fn sign_in(&self, token: &IdentityToken) -> Result<SignInOutcome, Error> {
        let identity = self
            .verifier
            .verify(token)
            .await
            .map_err(map_verifier_error)?;
        let user_id = identity.user_id();
        let existing = self
            .profiles
            .find_by_id(&user_id)
            .await
            .map_err(map_profile_error)?;
        let profile = match existing {
            Some(profile) => profile,
            None => {
                let skeleton = UserProfile::skeleton(
                    user_id,
                    identity.display_name,
                    identity.email,
                    identity.photo_url,
                    self.clock.utc(),
                );
                info!(%user_id, provider = %identity.provider, "created profile on first sign-in");
                self.profiles
                    .insert_if_absent(&skeleton)
                    .await
                    .map_err(map_profile_error)?
            }
        };
        Ok(SignInOutcome {
            user_id,
            onboarding_required: !profile.onboarded(),
        })
    }
}

#[async_trait]
impl<U, L, A, V: ?Sized> ProfileCommand for ProfileService<U, L, A, V>
where
    U: UserProfileRepository,
    L: LikeRepository,
    A: ApplicationRepository,
    V: IdentityVerifier,
{
    async fn complete_sign_up(
        &self,
        user_id: UserId,
        details: SignUpDetails,
    ) -> Result<UserProfile, Error> {
        let mut profile = self.existing_profile(user_id).await?;
        profile.complete_sign_up(details, self.clock.utc());
        self.store(profile).await
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error> {
        if changes.is_empty() {
            return Err(
                Error::invalid_request("at least one field must be supplied").with_details(
                    json!({ "code": "empty_update" }),
                ),
            );
        }
        let mut profile = self.existing_profile(user_id).await?;
        profile.apply(changes, self.clock.utc());
        self.store(profile).await
    }
}

#[async_trait]
impl<U, L, A, V: ?Sized> ProfileQuery for ProfileService<U, L, A, V>
where
    U: UserProfileRepository,
    L: LikeRepository,
    A: ApplicationRepository,
    V: IdentityVerifier,
{
    async fn own_profile(&self, user_id: UserId) -> Result<ProfileOverview, Error> {
        let profile = self.existing_profile(user_id).await?;
        let liked_project_ids = self
            .likes
            .liked_project_ids(&user_id)
            .await
            .map_err(map_like_error)?;
        let applied_project_ids = self
            .applications
            .applied_project_ids(&user_id)
            .await
            .map_err(map_application_error)?;
        Ok(ProfileOverview {
            profile,
            liked_project_ids,
            applied_project_ids,
        })
    }

    async fn public_profile(&self, user_id: UserId) -> Result<UserProfile, Error> {
        self.existing_profile(user_id).await
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
