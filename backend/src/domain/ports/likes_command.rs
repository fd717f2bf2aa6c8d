//! Driving port for liking and unliking postings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ProjectId, UserId};

/// Outcome of a like toggle as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeResponse {
    pub success: bool,
    /// Whether the posting is liked after the toggle.
    pub liked: bool,
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesCommand: Send + Sync {
    /// Like the posting if it is not liked yet, otherwise remove the like.
    async fn toggle_like(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<ToggleLikeResponse, Error>;
}
