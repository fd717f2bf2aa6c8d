//! Like toggling and liked-posting listings.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    LikeRepository, LikeRepositoryError, LikesCommand, LikesQuery, ProjectRepository,
    ProjectSlice, SliceRequest, ToggleLikeResponse,
};
use crate::domain::project_service::load_project_slice;
use crate::domain::{AssociationKey, Error, LikeToggle, ProjectId, UserId};

fn map_like_error(error: LikeRepositoryError) -> Error {
    match error {
        LikeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("like repository unavailable: {message}"))
        }
        LikeRepositoryError::Query { message } => {
            Error::internal(format!("like repository error: {message}"))
        }
        LikeRepositoryError::MissingProject { project_id } => {
            Error::not_found(format!("project {project_id} not found"))
        }
    }
}

/// Like service implementing [`LikesCommand`] and [`LikesQuery`].
#[derive(Clone)]
pub struct LikeService<L, P> {
    likes: Arc<L>,
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<L, P> LikeService<L, P> {
    /// Create a new service with the given repositories.
    pub fn new(likes: Arc<L>, projects: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            likes,
            projects,
            clock,
        }
    }
}

#[async_trait]
impl<L, P> LikesCommand for LikeService<L, P>
where
    L: LikeRepository,
    P: ProjectRepository,
{
    async fn toggle_like(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<ToggleLikeResponse, Error> {
        let key = AssociationKey::new(user_id, project_id);
        let outcome = self
            .likes
            .toggle(&key, self.clock.utc())
            .await
            .map_err(map_like_error)?;
        debug!(%key, liked = outcome.is_liked(), "like toggled");
        let message = match outcome {
            LikeToggle::Liked => "Added to your liked projects",
            LikeToggle::Unliked => "Removed from your liked projects",
        };
        Ok(ToggleLikeResponse {
            success: true,
            liked: outcome.is_liked(),
            message: message.to_owned(),
        })
    }
}

#[async_trait]
impl<L, P> LikesQuery for LikeService<L, P>
where
    L: LikeRepository,
    P: ProjectRepository,
{
    async fn is_liked(&self, user_id: UserId, project_id: ProjectId) -> Result<bool, Error> {
        self.likes
            .exists(&AssociationKey::new(user_id, project_id))
            .await
            .map_err(map_like_error)
    }

    async fn liked_projects(
        &self,
        user_id: UserId,
        request: SliceRequest,
    ) -> Result<ProjectSlice, Error> {
        let ids = self
            .likes
            .liked_project_ids(&user_id)
            .await
            .map_err(map_like_error)?;
        load_project_slice(self.projects.as_ref(), &ids, request).await
    }
}
