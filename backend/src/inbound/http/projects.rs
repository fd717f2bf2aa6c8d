//! Project posting handlers.
//!
//! ```text
//! GET    /api/v1/projects?category=study&position=backend&sort=popular&cursor=...&limit=12
//! POST   /api/v1/projects
//! GET    /api/v1/projects/{id}
//! PATCH  /api/v1/projects/{id}
//! DELETE /api/v1/projects/{id}
//! POST   /api/v1/projects/{id}/close
//! ```
//!
//! Browsing is public; writing requires a session and, for existing
//! postings, ownership.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use mockable::Clock;
use pagination::PaginationLinks;

use super::ApiResult;
use super::projects_dto::{
    CreateProjectBody, ListProjectsQuery, PatchProjectBody, ProjectDetailResponse,
    ProjectPageResponse, ProjectResponse,
};
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::parse_project_id;
use crate::domain::ports::{CreateProjectRequest, ListProjectsRequest, UpdateProjectRequest};
use crate::domain::{ProjectDraft, ProjectPatch};

/// Browse postings matching the filter, one cursor page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(ListProjectsQuery),
    responses(
        (status = 200, description = "One page of postings", body = ProjectPageResponse),
        (status = 400, description = "Unknown filter keyword or bad cursor", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjects",
    security([])
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<ListProjectsQuery>,
) -> ApiResult<web::Json<ProjectPageResponse>> {
    let list_request = ListProjectsRequest::try_from(query.into_inner())?;
    let page = state.projects.list(list_request).await?;
    let links = PaginationLinks::from_request_url(&request.full_url(), page.next_cursor.as_deref());
    Ok(web::Json(ProjectPageResponse::new(&page, links)))
}

/// Publish a new posting owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectBody,
    responses(
        (status = 201, description = "Posting created", body = ProjectResponse,
            headers(("Location" = String, description = "URL of the new posting"))),
        (status = 400, description = "Invalid posting", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProjectBody>,
) -> ApiResult<HttpResponse> {
    let owner_id = session.require_user_id()?;
    let draft = ProjectDraft::try_from(payload.into_inner())?;
    let project = state
        .project_commands
        .create(CreateProjectRequest { owner_id, draft })
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/projects/{}", project.id())))
        .json(ProjectResponse::from(&project)))
}

/// Read one posting, counting the view.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "The posting", body = ProjectDetailResponse),
        (status = 400, description = "Invalid project id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject",
    security([])
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectDetailResponse>> {
    let project_id = parse_project_id(&path.into_inner())?;
    let project = state.projects.get(project_id).await?;
    let liked = match session.user_id()? {
        Some(user_id) => Some(state.likes.is_liked(user_id, project_id).await?),
        None => None,
    };
    Ok(web::Json(ProjectDetailResponse::new(&project, liked, state.clock.utc())))
}

/// Merge the supplied fields into an owned posting.
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    request_body = PatchProjectBody,
    responses(
        (status = 200, description = "Updated posting", body = ProjectResponse),
        (status = 400, description = "Invalid update", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[patch("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PatchProjectBody>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let user_id = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let patch = ProjectPatch::try_from(payload.into_inner())?;
    let project = state
        .project_commands
        .update(UpdateProjectRequest {
            user_id,
            project_id,
            patch,
        })
        .await?;
    Ok(web::Json(ProjectResponse::from(&project)))
}

/// Stop recruiting for an owned posting. Closing twice is a no-op.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/close",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Closed posting", body = ProjectResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "closeProject"
)]
#[post("/projects/{id}/close")]
pub async fn close_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let user_id = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let project = state.project_commands.close(user_id, project_id).await?;
    Ok(web::Json(ProjectResponse::from(&project)))
}

/// Delete an owned posting together with its likes and applications.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    state.project_commands.delete(user_id, project_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
