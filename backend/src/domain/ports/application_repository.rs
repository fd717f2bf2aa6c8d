//! Port for application association records.

use async_trait::async_trait;

use crate::domain::{Application, AssociationKey, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
        /// The user already applied to the posting.
        Duplicate { key: String } => "application {key} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Store a new application; fails with `Duplicate` when the key exists.
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    /// Delete an application. Returns `false` when none existed.
    async fn delete(&self, key: &AssociationKey) -> Result<bool, ApplicationRepositoryError>;

    /// Fetch an application by key.
    async fn find(
        &self,
        key: &AssociationKey,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Applications to a posting, oldest first.
    async fn list_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Ids of postings `user` applied to, most recent first.
    async fn applied_project_ids(
        &self,
        user: &UserId,
    ) -> Result<Vec<ProjectId>, ApplicationRepositoryError>;
}

/// Fixture implementation that accepts writes and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureApplicationRepository;

#[async_trait]
impl ApplicationRepository for FixtureApplicationRepository {
    async fn insert(&self, _application: &Application) -> Result<(), ApplicationRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _key: &AssociationKey) -> Result<bool, ApplicationRepositoryError> {
        Ok(false)
    }

    async fn find(
        &self,
        _key: &AssociationKey,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(None)
    }

    async fn list_for_project(
        &self,
        _project: &ProjectId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        Ok(Vec::new())
    }

    async fn applied_project_ids(
        &self,
        _user: &UserId,
    ) -> Result<Vec<ProjectId>, ApplicationRepositoryError> {
        Ok(Vec::new())
    }
}
