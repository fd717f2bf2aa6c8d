//! Like toggle handler.
//!
//! ```text
//! POST /api/v1/projects/{id}/like
//! ```

use actix_web::{post, web};

use super::ApiResult;
use super::schemas::{ErrorSchema, ToggleLikeSchema};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::parse_project_id;
use crate::domain::ports::ToggleLikeResponse;

/// Like the posting, or remove the like when it is already liked.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/like",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Like state after the toggle", body = ToggleLikeSchema),
        (status = 400, description = "Invalid project id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "toggleLike"
)]
#[post("/projects/{id}/like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ToggleLikeResponse>> {
    let user_id = session.require_user_id()?;
    let project_id = parse_project_id(&path.into_inner())?;
    let outcome = state.like_commands.toggle_like(user_id, project_id).await?;
    Ok(web::Json(outcome))
}
