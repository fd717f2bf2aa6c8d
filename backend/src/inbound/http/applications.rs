//! Application handlers.
//!
//! ```text
//! POST   /api/v1/projects/{id}/applications {"position":"backend","message":"..."}
//! DELETE /api/v1/projects/{id}/applications/me
//! GET    /api/v1/projects/{id}/applications
//! ```
//!
//! Applying notifies the posting owner by email; a failed email does not
//! fail the request.

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::profiles_dto::PublicProfileResponse;
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{FieldName, parse_keyword, parse_project_id};
use crate::domain::dates::format_date;
use crate::domain::ports::{Applicant, ApplyRequest};
use crate::domain::{Application, Position};

/// Body of `POST /api/v1/projects/{id}/applications`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplyBody {
    #[schema(example = "backend")]
    pub position: String,
    #[schema(example = "I have shipped two Actix services and would love to help.")]
    pub message: String,
}

/// A recorded application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[schema(format = Uuid)]
    pub project_id: String,
    #[schema(format = Uuid)]
    pub user_id: String,
    pub position: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[schema(example = "2026.05.20")]
    pub applied_on: String,
}

impl From<&Application> for ApplicationResponse {
    fn from(application: &Application) -> Self {
        Self {
            project_id: application.key.project_id().to_string(),
            user_id: application.key.user_id().to_string(),
            position: application.position.as_str().to_owned(),
            message: application.message.as_ref().to_owned(),
            created_at: application.created_at,
            applied_on: format_date(application.created_at),
        }
    }
}

/// An application with the applicant's public profile, when it still exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    pub application: ApplicationResponse,
    pub applicant: Option<PublicProfileResponse>,
}

impl From<&Applicant> for ApplicantResponse {
    fn from(applicant: &Applicant) -> Self {
        Self {
            application: ApplicationResponse::from(&applicant.application),
            applicant: applicant.profile.as_ref().map(PublicProfileResponse::from),
        }
    }
}

/// Apply for one recruited position on a posting.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/applications",
    params(("id" = String, Path, description = "Project id")),
    request_body = ApplyBody,
    responses(
        (status = 201, description = "Application recorded", body = ApplicationResponse),
        (status = 400, description = "Bad position or message", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Applying to an own posting", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Already applied or posting closed", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "apply"
)]
#[post("/projects/{id}/applications")]
pub async fn apply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ApplyBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let ApplyBody { position, message } = payload.into_inner();
    let position = parse_keyword::<Position>(FieldName::new("position"), &position)?;
    let application = state
        .application_commands
        .apply(ApplyRequest {
            user_id,
            project_id,
            position,
            message,
        })
        .await?;
    Ok(HttpResponse::Created().json(ApplicationResponse::from(&application)))
}

/// Withdraw the caller's application.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}/applications/me",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Withdrawn"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No application to withdraw", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "withdrawApplication"
)]
#[delete("/projects/{id}/applications/me")]
pub async fn withdraw(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    state
        .application_commands
        .withdraw(user_id, project_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Applications to an owned posting.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/applications",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Applicants", body = [ApplicantResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listApplicants"
)]
#[get("/projects/{id}/applications")]
pub async fn list_applicants(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ApplicantResponse>>> {
    let owner_id = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let applicants = state.applications.applicants(owner_id, project_id).await?;
    Ok(web::Json(applicants.iter().map(ApplicantResponse::from).collect()))
}
