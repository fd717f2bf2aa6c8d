//! Sign-in and profile handlers.
//!
//! ```text
//! POST  /api/v1/login {"idToken":"..."}
//! POST  /api/v1/logout
//! GET   /api/v1/users/me
//! PUT   /api/v1/users/me
//! PATCH /api/v1/users/me
//! GET   /api/v1/users/me/likes?page=1&size=12
//! GET   /api/v1/users/me/applications?page=1&size=12
//! GET   /api/v1/users/me/projects
//! GET   /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, get, patch, post, put, web};
use serde_json::json;
use tracing::info;

use super::ApiResult;
use super::profiles_dto::{
    LoginRequest, LoginResponse, OwnProfileResponse, ProfileChangesBody, ProfileResponse,
    PublicProfileResponse, SignUpBody,
};
use super::projects_dto::{ProjectResponse, ProjectSliceResponse, SliceQuery};
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::parse_user_id;
use crate::domain::{Error, IdentityToken, ProfileChanges, SignUpDetails};

/// Verify an identity-provider token and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Token rejected", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let token = IdentityToken::new(&payload.id_token).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "idToken", "code": "missing_field" }))
    })?;
    let outcome = state.login.sign_in(&token).await?;
    session.persist_user(&outcome.user_id)?;
    info!(user_id = %outcome.user_id, "session started");
    Ok(web::Json(LoginResponse {
        user_id: outcome.user_id.to_string(),
        onboarding_required: outcome.onboarding_required,
    }))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// The signed-in user's profile with liked and applied posting ids.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Own profile", body = OwnProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OwnProfileResponse>> {
    let user_id = session.require_user_id()?;
    let overview = state.profiles.own_profile(user_id).await?;
    Ok(web::Json(OwnProfileResponse::from(&overview)))
}

/// Submit the sign-up form, completing onboarding.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = SignUpBody,
    responses(
        (status = 200, description = "Profile completed", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "completeSignUp"
)]
#[put("/users/me")]
pub async fn complete_sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let details = SignUpDetails::try_from(payload.into_inner())?;
    let profile = state
        .profile_commands
        .complete_sign_up(user_id, details)
        .await?;
    Ok(web::Json(ProfileResponse::from(&profile)))
}

/// Change some profile fields; fields not supplied are kept.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = ProfileChangesBody,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[patch("/users/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileChangesBody>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let changes = ProfileChanges::try_from(payload.into_inner())?;
    let profile = state
        .profile_commands
        .update_profile(user_id, changes)
        .await?;
    Ok(web::Json(ProfileResponse::from(&profile)))
}

/// Postings the signed-in user likes, newest like first.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/likes",
    params(SliceQuery),
    responses(
        (status = 200, description = "Liked postings", body = ProjectSliceResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "likedProjects"
)]
#[get("/users/me/likes")]
pub async fn liked_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SliceQuery>,
) -> ApiResult<web::Json<ProjectSliceResponse>> {
    let user_id = session.require_user_id()?;
    let slice = state
        .likes
        .liked_projects(user_id, query.into_inner().into())
        .await?;
    Ok(web::Json(ProjectSliceResponse::from(&slice)))
}

/// Postings the signed-in user applied to, newest application first.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/applications",
    params(SliceQuery),
    responses(
        (status = 200, description = "Applied postings", body = ProjectSliceResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "appliedProjects"
)]
#[get("/users/me/applications")]
pub async fn applied_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SliceQuery>,
) -> ApiResult<web::Json<ProjectSliceResponse>> {
    let user_id = session.require_user_id()?;
    let slice = state
        .applications
        .applied_projects(user_id, query.into_inner().into())
        .await?;
    Ok(web::Json(ProjectSliceResponse::from(&slice)))
}

/// Postings owned by the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/projects",
    responses(
        (status = 200, description = "Own postings", body = [ProjectResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "ownProjects"
)]
#[get("/users/me/projects")]
pub async fn own_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let user_id = session.require_user_id()?;
    let projects = state.projects.owned_by(user_id).await?;
    Ok(web::Json(projects.iter().map(ProjectResponse::from).collect()))
}

/// Another user's public profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Public profile", body = PublicProfileResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "publicProfile",
    security([])
)]
#[get("/users/{id}")]
pub async fn public_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicProfileResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let profile = state.profiles.public_profile(user_id).await?;
    Ok(web::Json(PublicProfileResponse::from(&profile)))
}
