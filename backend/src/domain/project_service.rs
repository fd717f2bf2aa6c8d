//! Project posting services.
//!
//! This module implements the posting driving ports: ownership checks,
//! merge updates and cursor pagination over the filtered listing.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Cursor, Page};
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CreateProjectRequest, ListProjectsRequest, ProjectListQuery, ProjectRepository,
    ProjectRepositoryError, ProjectSlice, ProjectsCommand, ProjectsQuery, SliceRequest,
    UpdateProjectRequest,
};
use crate::domain::{
    Error, Project, ProjectCursorKey, ProjectId, ProjectValidationError, SearchFilter, UserId,
};

/// Map repository failures onto API errors.
pub(crate) fn map_project_repository_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
        ProjectRepositoryError::Duplicate { id } => {
            Error::conflict(format!("project {id} already exists"))
        }
    }
}

/// Map posting validation failures onto `invalid_request` with field details.
pub(crate) fn map_project_validation_error(error: ProjectValidationError) -> Error {
    let field = error.field();
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_project",
    }))
}

pub(crate) fn project_not_found(id: ProjectId) -> Error {
    Error::not_found(format!("project {id} not found"))
}

/// Load the requested page of postings from an ordered id list.
pub(crate) async fn load_project_slice<P>(
    projects: &P,
    ids: &[ProjectId],
    request: SliceRequest,
) -> Result<ProjectSlice, Error>
where
    P: ProjectRepository + ?Sized,
{
    let page_ids = ids.get(request.range(ids.len())).unwrap_or_default();
    let items = projects
        .find_many(page_ids)
        .await
        .map_err(map_project_repository_error)?;
    Ok(ProjectSlice::new(items, request, ids.len()))
}

/// Posting service implementing [`ProjectsCommand`] and [`ProjectsQuery`].
#[derive(Clone)]
pub struct ProjectService<P> {
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> ProjectService<P> {
    /// Create a new service with the given repository.
    pub fn new(projects: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { projects, clock }
    }
}

impl<P> ProjectService<P>
where
    P: ProjectRepository,
{
    async fn owned_project(&self, user_id: UserId, id: ProjectId) -> Result<Project, Error> {
        let project = self
            .projects
            .find_by_id(&id)
            .await
            .map_err(map_project_repository_error)?
            .ok_or_else(|| project_not_found(id))?;
        if !project.is_owned_by(user_id) {
            return Err(Error::forbidden("only the owner may change this project"));
        }
        Ok(project)
    }

    async fn persist(&self, project: Project) -> Result<Project, Error> {
        let saved = self
            .projects
            .save(&project)
            .await
            .map_err(map_project_repository_error)?;
        if saved {
            Ok(project)
        } else {
            Err(project_not_found(project.id()))
        }
    }

    fn decode_cursor(token: &str, filter: &SearchFilter) -> Result<ProjectCursorKey, Error> {
        let key = Cursor::<ProjectCursorKey>::decode(token)
            .map_err(|err| {
                Error::invalid_request(format!("invalid cursor: {err}")).with_details(json!({
                    "field": "cursor",
                    "code": "invalid_cursor",
                }))
            })?
            .into_inner();
        if key.sort != filter.sort {
            return Err(
                Error::invalid_request("cursor was issued for a different sort order")
                    .with_details(json!({
                        "field": "cursor",
                        "code": "cursor_sort_mismatch",
                        "value": key.sort.as_str(),
                    })),
            );
        }
        Ok(key)
    }
}

#[async_trait]
impl<P> ProjectsCommand for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, Error> {
        let project = Project::create(
            ProjectId::random(),
            request.owner_id,
            request.draft,
            self.clock.utc(),
        )
        .map_err(map_project_validation_error)?;
        self.projects
            .insert(&project)
            .await
            .map_err(map_project_repository_error)?;
        info!(project_id = %project.id(), owner_id = %project.owner_id(), "project created");
        Ok(project)
    }

    async fn update(&self, request: UpdateProjectRequest) -> Result<Project, Error> {
        let mut project = self
            .owned_project(request.user_id, request.project_id)
            .await?;
        project
            .apply(request.patch, self.clock.utc())
            .map_err(map_project_validation_error)?;
        self.persist(project).await
    }

    async fn close(&self, user_id: UserId, project_id: ProjectId) -> Result<Project, Error> {
        let mut project = self.owned_project(user_id, project_id).await?;
        if !project.is_recruiting() {
            return Ok(project);
        }
        project.close(self.clock.utc());
        let project = self.persist(project).await?;
        info!(project_id = %project_id, "project closed");
        Ok(project)
    }

    async fn delete(&self, user_id: UserId, project_id: ProjectId) -> Result<(), Error> {
        self.owned_project(user_id, project_id).await?;
        let deleted = self
            .projects
            .delete(&project_id)
            .await
            .map_err(map_project_repository_error)?;
        if !deleted {
            return Err(project_not_found(project_id));
        }
        info!(project_id = %project_id, "project deleted");
        Ok(())
    }
}

#[async_trait]
impl<P> ProjectsQuery for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn get(&self, project_id: ProjectId) -> Result<Project, Error> {
        self.projects
            .record_view(&project_id)
            .await
            .map_err(map_project_repository_error)?
            .ok_or_else(|| project_not_found(project_id))
    }

    async fn list(&self, request: ListProjectsRequest) -> Result<Page<Project>, Error> {
        let ListProjectsRequest { filter, page } = request;
        let limit = page.normalized_limit();
        let after = page
            .cursor()
            .map(|token| Self::decode_cursor(token, &filter))
            .transpose()?;
        let items = self
            .projects
            .list(&ProjectListQuery {
                filter,
                after,
                limit: limit + 1,
            })
            .await
            .map_err(map_project_repository_error)?;
        Page::from_overfetch(items, limit, |last| {
            Cursor::new(ProjectCursorKey::for_project(filter.sort, last)).encode()
        })
        .map_err(|err| Error::internal(format!("failed to encode cursor: {err}")))
    }

    async fn owned_by(&self, owner_id: UserId) -> Result<Vec<Project>, Error> {
        self.projects
            .list_by_owner(&owner_id)
            .await
            .map_err(map_project_repository_error)
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
