//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `actix_web::web::Data` and only see
//! driving ports, so they stay testable without any I/O behind them.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    ApplicationRepository, ApplicationsCommand, ApplicationsQuery, EmailNotifier,
    IdentityVerifier, LikeRepository, LikesCommand, LikesQuery, LoginService, ProfileCommand,
    ProfileQuery, ProjectRepository, ProjectsCommand, ProjectsQuery, UserProfileRepository,
};
use crate::domain::{ApplicationService, LikeService, ProfileService, ProjectService};

/// Driven adapters the domain services are built on.
pub struct DrivenAdapters<P, U, L, A> {
    pub projects: Arc<P>,
    pub profiles: Arc<U>,
    pub likes: Arc<L>,
    pub applications: Arc<A>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub notifier: Arc<dyn EmailNotifier>,
    pub clock: Arc<dyn Clock>,
}

/// Parameter object bundling every port implementation used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub profile_commands: Arc<dyn ProfileCommand>,
    pub projects: Arc<dyn ProjectsQuery>,
    pub project_commands: Arc<dyn ProjectsCommand>,
    pub likes: Arc<dyn LikesQuery>,
    pub like_commands: Arc<dyn LikesCommand>,
    pub applications: Arc<dyn ApplicationsQuery>,
    pub application_commands: Arc<dyn ApplicationsCommand>,
    /// Reference instant for relative dates in responses.
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub profile_commands: Arc<dyn ProfileCommand>,
    pub projects: Arc<dyn ProjectsQuery>,
    pub project_commands: Arc<dyn ProjectsCommand>,
    pub likes: Arc<dyn LikesQuery>,
    pub like_commands: Arc<dyn LikesCommand>,
    pub applications: Arc<dyn ApplicationsQuery>,
    pub application_commands: Arc<dyn ApplicationsCommand>,
    /// Reference instant for relative dates in responses.
    pub clock: Arc<dyn Clock>,
}

impl HttpStatePorts {
    /// Build every domain service over one set of driven adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jam_backend::domain::ports::FixtureIdentityVerifier;
    /// use jam_backend::inbound::http::state::{DrivenAdapters, HttpState, HttpStatePorts};
    /// use jam_backend::outbound::email::LoggingEmailNotifier;
    /// use jam_backend::outbound::memory::MemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let ports = HttpStatePorts::from_adapters(DrivenAdapters {
    ///     projects: store.clone(),
    ///     profiles: store.clone(),
    ///     likes: store.clone(),
    ///     applications: store,
    ///     verifier: Arc::new(FixtureIdentityVerifier),
    ///     notifier: Arc::new(LoggingEmailNotifier),
    ///     clock: Arc::new(DefaultClock),
    /// });
    /// let state = HttpState::new(ports);
    /// let _login = state.login.clone();
    /// ```
    pub fn from_adapters<P, U, L, A>(adapters: DrivenAdapters<P, U, L, A>) -> Self
    where
        P: ProjectRepository + 'static,
        U: UserProfileRepository + 'static,
        L: LikeRepository + 'static,
        A: ApplicationRepository + 'static,
    {
        let DrivenAdapters {
            projects,
            profiles,
            likes,
            applications,
            verifier,
            notifier,
            clock,
        } = adapters;

        let project_service = Arc::new(ProjectService::new(projects.clone(), clock.clone()));
        let like_service = Arc::new(LikeService::new(
            likes.clone(),
            projects.clone(),
            clock.clone(),
        ));
        let application_service = Arc::new(ApplicationService::new(
            applications.clone(),
            projects,
            profiles.clone(),
            notifier,
            clock.clone(),
        ));
        let profile_service = Arc::new(ProfileService::new(
            profiles,
            likes,
            applications,
            verifier,
            clock.clone(),
        ));

        Self {
            login: profile_service.clone(),
            profiles: profile_service.clone(),
            profile_commands: profile_service,
            projects: project_service.clone(),
            project_commands: project_service,
            likes: like_service.clone(),
            like_commands: like_service,
            applications: application_service.clone(),
            application_commands: application_service,
            clock,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            profiles,
            profile_commands,
            projects,
            project_commands,
            likes,
            like_commands,
            applications,
            application_commands,
            clock,
        } = ports;
        Self {
            login,
            profiles,
            profile_commands,
            projects,
            project_commands,
            likes,
            like_commands,
            applications,
            application_commands,
            clock,
        }
    }
}
