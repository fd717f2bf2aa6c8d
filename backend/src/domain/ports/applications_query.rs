//! Driving port for reading applications.

use async_trait::async_trait;

use crate::domain::{Application, Error, ProjectId, UserId, UserProfile};

use super::{ProjectSlice, SliceRequest};

/// An application together with the applicant's profile, if it still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub application: Application,
    pub profile: Option<UserProfile>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsQuery: Send + Sync {
    /// Applications to a posting, visible to its owner only.
    async fn applicants(
        &self,
        owner_id: UserId,
        project_id: ProjectId,
    ) -> Result<Vec<Applicant>, Error>;

    /// Postings `user_id` applied to, most recent first, sliced by page.
    async fn applied_projects(
        &self,
        user_id: UserId,
        request: SliceRequest,
    ) -> Result<ProjectSlice, Error>;
}
