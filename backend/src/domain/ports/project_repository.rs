//! Port for project posting persistence.
//!
//! Adapters store whole posting documents. Listing applies a
//! [`SearchFilter`] and resumes strictly after an optional cursor key, in the
//! order defined by [`ProjectCursorKey::listing_cmp`].

use async_trait::async_trait;

use crate::domain::{Project, ProjectCursorKey, ProjectId, SearchFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
        /// A posting with the same id already exists.
        Duplicate { id: String } => "project {id} already exists",
    }
}

/// One page request against the posting listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectListQuery {
    pub filter: SearchFilter,
    /// Resume strictly after this position; `None` starts from the top.
    pub after: Option<ProjectCursorKey>,
    /// Maximum number of postings to return.
    pub limit: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Store a new posting.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Overwrite an existing posting with `project`.
    ///
    /// Returns `false` when the posting no longer exists.
    async fn save(&self, project: &Project) -> Result<bool, ProjectRepositoryError>;

    /// Fetch a posting by id.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Increment the view counter and return the updated posting.
    async fn record_view(&self, id: &ProjectId)
    -> Result<Option<Project>, ProjectRepositoryError>;

    /// Delete a posting together with its like and application records.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError>;

    /// List postings matching the query, in listing order.
    async fn list(&self, query: &ProjectListQuery) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Postings owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Fetch the postings among `ids` that still exist, in the order given.
    async fn find_many(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectRepository;

#[async_trait]
impl ProjectRepository for FixtureProjectRepository {
    async fn insert(&self, _project: &Project) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn save(&self, _project: &Project) -> Result<bool, ProjectRepositoryError> {
        Ok(false)
    }

    async fn find_by_id(
        &self,
        _id: &ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn record_view(
        &self,
        _id: &ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        Ok(false)
    }

    async fn list(
        &self,
        _query: &ProjectListQuery,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_many(
        &self,
        _ids: &[ProjectId],
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_finds_nothing() {
        let repo = FixtureProjectRepository;
        let id = ProjectId::random();
        assert!(repo.find_by_id(&id).await.expect("lookup").is_none());
        assert!(!repo.delete(&id).await.expect("delete"));
        let listing = repo
            .list(&ProjectListQuery {
                filter: SearchFilter::default(),
                after: None,
                limit: 12,
            })
            .await
            .expect("list");
        assert!(listing.is_empty());
    }

    #[test]
    fn duplicate_error_names_the_project() {
        let err = ProjectRepositoryError::duplicate("abc");
        assert_eq!(err.to_string(), "project abc already exists");
    }
}
