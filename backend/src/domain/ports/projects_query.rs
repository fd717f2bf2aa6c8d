//! Driving port for reading project postings.

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::{Error, Project, ProjectId, SearchFilter, UserId};

/// Request for one page of the posting listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProjectsRequest {
    pub filter: SearchFilter,
    pub page: PageParams,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsQuery: Send + Sync {
    /// Fetch a posting for its detail view, counting one view.
    async fn get(&self, project_id: ProjectId) -> Result<Project, Error>;

    /// One page of postings matching the filter.
    ///
    /// The cursor is only valid for the sort order it was issued under.
    async fn list(&self, request: ListProjectsRequest) -> Result<Page<Project>, Error>;

    /// Every posting owned by `owner_id`, newest first.
    async fn owned_by(&self, owner_id: UserId) -> Result<Vec<Project>, Error>;
}
