//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request and response bodies, and the domain schema wrappers from
//! [`crate::inbound::http::schemas`]. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::applications::{ApplicantResponse, ApplicationResponse, ApplyBody};
use crate::inbound::http::profiles_dto::{
    LoginRequest, LoginResponse, OwnProfileResponse, ProfileChangesBody, ProfileResponse,
    PublicProfileResponse, SignUpBody,
};
use crate::inbound::http::projects_dto::{
    CreateProjectBody, PageLinksResponse, PatchProjectBody, ProjectDetailResponse,
    ProjectPageResponse, ProjectResponse, ProjectSliceResponse, RecruitmentBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ToggleLikeSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Project Jam API",
        description = "Team matching: browse project postings, like them, apply for a \
                       position and manage your profile.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::complete_sign_up,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::liked_projects,
        crate::inbound::http::users::applied_projects,
        crate::inbound::http::users::own_projects,
        crate::inbound::http::users::public_profile,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::close_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::likes::toggle_like,
        crate::inbound::http::applications::apply,
        crate::inbound::http::applications::withdraw,
        crate::inbound::http::applications::list_applicants,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ToggleLikeSchema,
        LoginRequest,
        LoginResponse,
        SignUpBody,
        ProfileChangesBody,
        PublicProfileResponse,
        ProfileResponse,
        OwnProfileResponse,
        RecruitmentBody,
        CreateProjectBody,
        PatchProjectBody,
        ProjectResponse,
        ProjectDetailResponse,
        PageLinksResponse,
        ProjectPageResponse,
        ProjectSliceResponse,
        ApplyBody,
        ApplicationResponse,
        ApplicantResponse,
    )),
    tags(
        (name = "users", description = "Sign-in, onboarding and profiles"),
        (name = "projects", description = "Project postings and likes"),
        (name = "applications", description = "Applying to postings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn project_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let project = schemas.get("ProjectResponse").expect("ProjectResponse schema");

        assert_object_schema_has_field(project, "likeCount");
        assert_object_schema_has_field(project, "postedOn");
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/projects")]
    #[case("/api/v1/projects/{id}")]
    #[case("/api/v1/projects/{id}/close")]
    #[case("/api/v1/projects/{id}/like")]
    #[case("/api/v1/projects/{id}/applications")]
    #[case("/api/v1/projects/{id}/applications/me")]
    #[case("/health/ready")]
    fn path_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
