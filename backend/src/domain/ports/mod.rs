//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, identity verification, email) are
//! implemented by outbound adapters. Driving ports (commands and queries)
//! are implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod application_repository;
mod applications_command;
mod applications_query;
mod email_notifier;
mod identity_verifier;
mod like_repository;
mod likes_command;
mod likes_query;
mod login_service;
mod profile_command;
mod profile_query;
mod project_repository;
mod project_slice;
mod projects_command;
mod projects_query;
mod user_profile_repository;

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{
    ApplicationRepository, ApplicationRepositoryError, FixtureApplicationRepository,
};
#[cfg(test)]
pub use applications_command::MockApplicationsCommand;
pub use applications_command::{ApplicationsCommand, ApplyRequest};
#[cfg(test)]
pub use applications_query::MockApplicationsQuery;
pub use applications_query::{Applicant, ApplicationsQuery};
#[cfg(test)]
pub use email_notifier::MockEmailNotifier;
pub use email_notifier::{EmailNotifier, EmailNotifierError, FixtureEmailNotifier, OutboundEmail};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{
    FIXTURE_PROVIDER, FixtureIdentityVerifier, IdentityVerifier, IdentityVerifierError,
};
#[cfg(test)]
pub use like_repository::MockLikeRepository;
pub use like_repository::{FixtureLikeRepository, LikeRepository, LikeRepositoryError};
#[cfg(test)]
pub use likes_command::MockLikesCommand;
pub use likes_command::{LikesCommand, ToggleLikeResponse};
#[cfg(test)]
pub use likes_query::MockLikesQuery;
pub use likes_query::LikesQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, SignInOutcome};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::{ProfileOverview, ProfileQuery};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{
    FixtureProjectRepository, ProjectListQuery, ProjectRepository, ProjectRepositoryError,
};
pub use project_slice::{DEFAULT_SLICE_SIZE, MAX_SLICE_SIZE, ProjectSlice, SliceRequest};
#[cfg(test)]
pub use projects_command::MockProjectsCommand;
pub use projects_command::{CreateProjectRequest, ProjectsCommand, UpdateProjectRequest};
#[cfg(test)]
pub use projects_query::MockProjectsQuery;
pub use projects_query::{ListProjectsRequest, ProjectsQuery};
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{
    FixtureUserProfileRepository, UserProfileRepository, UserProfileRepositoryError,
};
