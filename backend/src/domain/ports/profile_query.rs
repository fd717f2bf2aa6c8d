//! Driving port for reading profiles.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, UserId, UserProfile};

/// The caller's own profile with the postings they liked and applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOverview {
    pub profile: UserProfile,
    pub liked_project_ids: Vec<ProjectId>,
    pub applied_project_ids: Vec<ProjectId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// The caller's profile with liked and applied posting ids.
    async fn own_profile(&self, user_id: UserId) -> Result<ProfileOverview, Error>;

    /// Another user's profile.
    async fn public_profile(&self, user_id: UserId) -> Result<UserProfile, Error>;
}
