//! Driving port for applying to postings.

use async_trait::async_trait;

use crate::domain::{Application, Error, Position, ProjectId, UserId};

/// Request to apply for one position on a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub position: Position,
    /// Unvalidated message for the owner.
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsCommand: Send + Sync {
    /// Record an application and notify the posting owner by email.
    ///
    /// # Errors
    ///
    /// - `conflict` when the posting is closed or the user already applied.
    /// - `forbidden` when the user owns the posting.
    /// - `invalid_request` when the position is not recruited or the message
    ///   is out of bounds.
    /// - `not_found` when the posting does not exist.
    async fn apply(&self, request: ApplyRequest) -> Result<Application, Error>;

    /// Withdraw the caller's application; `not_found` when there is none.
    async fn withdraw(&self, user_id: UserId, project_id: ProjectId) -> Result<(), Error>;
}
