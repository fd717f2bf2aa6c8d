//! Port for like association records.
//!
//! Toggling is a single repository call: adapters check for the record,
//! delete or create it and adjust the posting's like counter as one unit, so
//! two concurrent toggles by the same user cannot both observe "not liked".

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AssociationKey, LikeToggle, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by like repository adapters.
    pub enum LikeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "like repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "like repository query failed: {message}",
        /// The liked posting does not exist.
        MissingProject { project_id: String } => "project {project_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Whether the like record exists.
    async fn exists(&self, key: &AssociationKey) -> Result<bool, LikeRepositoryError>;

    /// Create the record if absent, delete it if present, and adjust the
    /// posting's like counter accordingly.
    async fn toggle(
        &self,
        key: &AssociationKey,
        now: DateTime<Utc>,
    ) -> Result<LikeToggle, LikeRepositoryError>;

    /// Ids of postings liked by `user`, most recently liked first.
    async fn liked_project_ids(&self, user: &UserId)
    -> Result<Vec<ProjectId>, LikeRepositoryError>;
}

/// Fixture implementation where nothing is liked and toggles always like.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLikeRepository;

#[async_trait]
impl LikeRepository for FixtureLikeRepository {
    async fn exists(&self, _key: &AssociationKey) -> Result<bool, LikeRepositoryError> {
        Ok(false)
    }

    async fn toggle(
        &self,
        _key: &AssociationKey,
        _now: DateTime<Utc>,
    ) -> Result<LikeToggle, LikeRepositoryError> {
        Ok(LikeToggle::Liked)
    }

    async fn liked_project_ids(
        &self,
        _user: &UserId,
    ) -> Result<Vec<ProjectId>, LikeRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_toggle_always_likes() {
        let repo = FixtureLikeRepository;
        let key = AssociationKey::new(UserId::random(), ProjectId::random());
        assert!(!repo.exists(&key).await.expect("exists"));
        assert_eq!(
            repo.toggle(&key, Utc::now()).await.expect("toggle"),
            LikeToggle::Liked
        );
    }
}
