//! Driving port for project posting mutations.
//!
//! HTTP handlers call this port to create, edit, close and delete postings
//! without knowing which repository backs them.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectDraft, ProjectId, ProjectPatch, UserId};

/// Request to publish a new posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    /// The signed-in user, who becomes the owner.
    pub owner_id: UserId,
    pub draft: ProjectDraft,
}

/// Request to merge changes into an existing posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    /// The signed-in user; must own the posting.
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub patch: ProjectPatch,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsCommand: Send + Sync {
    /// Create a recruiting posting owned by the caller.
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, Error>;

    /// Merge a patch into a posting the caller owns.
    async fn update(&self, request: UpdateProjectRequest) -> Result<Project, Error>;

    /// Stop recruiting on a posting the caller owns.
    async fn close(&self, user_id: UserId, project_id: ProjectId) -> Result<Project, Error>;

    /// Delete a posting the caller owns, with its likes and applications.
    async fn delete(&self, user_id: UserId, project_id: ProjectId) -> Result<(), Error>;
}
