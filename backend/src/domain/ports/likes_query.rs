//! Driving port for reading a user's likes.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, UserId};

use super::{ProjectSlice, SliceRequest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesQuery: Send + Sync {
    /// Whether `user_id` currently likes the posting.
    async fn is_liked(&self, user_id: UserId, project_id: ProjectId) -> Result<bool, Error>;

    /// Postings liked by `user_id`, most recent first, sliced by page.
    async fn liked_projects(
        &self,
        user_id: UserId,
        request: SliceRequest,
    ) -> Result<ProjectSlice, Error>;
}
