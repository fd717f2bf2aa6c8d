//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, and the services implementing the driving ports. Types document
//! their invariants and serialisation contracts (serde) in their Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - UserProfile, Project, Like, Application: the stored documents.
//! - SearchFilter / ProjectCursorKey: browse criteria and listing order.
//! - Services: `ProjectService`, `LikeService`, `ApplicationService`,
//!   `ProfileService`.

pub mod application_service;
pub mod association;
pub mod auth;
pub mod dates;
pub mod error;
mod keyword;
pub mod like_service;
pub mod ports;
pub mod profile_service;
pub mod project;
pub mod project_service;
pub mod search_filter;
pub mod trace_id;
pub mod user;
pub mod web_url;

pub use self::application_service::ApplicationService;
pub use self::association::{
    APPLICATION_MESSAGE_MAX, Application, ApplicationMessage, ApplicationValidationError,
    AssociationKey, AssociationKeyError, Like, LikeToggle,
};
pub use self::auth::{IdentityToken, IdentityTokenError, VerifiedIdentity};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::like_service::LikeService;
pub use self::profile_service::ProfileService;
pub use self::project::{
    ParseProjectCategoryError, ParseProjectStatusError, ParseWorkflowError, Project,
    ProjectCategory, ProjectDraft, ProjectId, ProjectPatch, ProjectRecord, ProjectStatus,
    ProjectTitle, ProjectValidationError, RecruitmentPlan, RecruitmentPosition, TechStack,
    Workflow,
};
pub use self::project_service::ProjectService;
pub use self::search_filter::{ParseSortOrderError, ProjectCursorKey, SearchFilter, SortOrder};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, Email, ExperienceTier, Introduction, ParseExperienceTierError,
    ParsePositionError, Position, ProfileChanges, SignUpDetails, UserId, UserProfile,
    UserProfileRecord, UserValidationError,
};
pub use self::web_url::{WebUrl, WebUrlError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use jam_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
