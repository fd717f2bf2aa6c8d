//! Port abstraction for profile persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Insert or replace a profile.
    async fn save(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError>;

    /// Insert `profile` unless a row with its id exists, returning whichever
    /// profile is stored afterwards.
    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<UserProfile, UserProfileRepositoryError>;

    /// Fetch a profile by identifier.
    async fn find_by_id(&self, id: &UserId)
    -> Result<Option<UserProfile>, UserProfileRepositoryError>;

    /// Fetch the profiles among `ids` that exist; order is unspecified.
    async fn find_many(&self, ids: &[UserId])
    -> Result<Vec<UserProfile>, UserProfileRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileRepository;

#[async_trait]
impl UserProfileRepository for FixtureUserProfileRepository {
    async fn save(&self, _profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<UserProfile, UserProfileRepositoryError> {
        Ok(profile.clone())
    }

    async fn find_by_id(
        &self,
        _id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        Ok(None)
    }

    async fn find_many(
        &self,
        _ids: &[UserId],
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_lookup_returns_none() {
        let repo = FixtureUserProfileRepository;
        let found = repo
            .find_by_id(&UserId::random())
            .await
            .expect("fixture lookup should succeed");
        assert!(found.is_none());
    }
}
