//! HTTP inbound adapter exposing REST endpoints.

pub mod applications;
pub mod error;
pub mod health;
pub mod likes;
pub mod profiles_dto;
pub mod projects;
pub mod projects_dto;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Extractor failures (malformed JSON, query strings and path segments) are
/// reported as `invalid_request` errors. The caller mounts this inside a
/// scope wrapped with the session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::login)
        .service(users::logout)
        // `/users/me*` before `/users/{id}` so `me` is not read as an id.
        .service(users::current_user)
        .service(users::complete_sign_up)
        .service(users::update_profile)
        .service(users::liked_projects)
        .service(users::applied_projects)
        .service(users::own_projects)
        .service(users::public_profile)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::get_project)
        .service(projects::update_project)
        .service(projects::delete_project)
        .service(projects::close_project)
        .service(likes::toggle_like)
        .service(applications::apply)
        .service(applications::withdraw)
        .service(applications::list_applicants);
}
