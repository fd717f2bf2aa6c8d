//! Application services.
//!
//! Applying checks the posting's state, records the application and then
//! emails the owner. Email delivery is best effort: failures are logged and
//! never undo a recorded application.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    Applicant, ApplicationRepository, ApplicationRepositoryError, ApplicationsCommand,
    ApplicationsQuery, ApplyRequest, EmailNotifier, OutboundEmail, ProjectRepository,
    ProjectSlice, SliceRequest, UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::project_service::{
    load_project_slice, map_project_repository_error, project_not_found,
};
use crate::domain::{
    Application, ApplicationMessage, AssociationKey, Error, Project, ProjectId, UserId,
    UserProfile,
};

fn map_application_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("application repository unavailable: {message}"))
        }
        ApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application repository error: {message}"))
        }
        ApplicationRepositoryError::Duplicate { .. } => {
            Error::conflict("you have already applied to this project").with_details(json!({
                "code": "already_applied",
            }))
        }
    }
}

fn map_profile_error(error: UserProfileRepositoryError) -> Error {
    match error {
        UserProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        UserProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
    }
}

fn application_email(
    project: &Project,
    owner: &UserProfile,
    applicant: Option<&UserProfile>,
    application: &Application,
) -> OutboundEmail {
    let applicant_name =
        applicant.map_or("A Project Jam member", |profile| profile.display_name().as_ref());
    OutboundEmail {
        to: owner.email().clone(),
        subject: format!("New application for \"{}\"", project.title()),
        body: format!(
            "{applicant_name} applied for the {position} position on \"{title}\".\n\n{message}",
            position = application.position,
            title = project.title(),
            message = application.message.as_ref(),
        ),
    }
}

/// Application service implementing [`ApplicationsCommand`] and
/// [`ApplicationsQuery`].
#[derive(Clone)]
pub struct ApplicationService<A, P, U, N: ?Sized> {
    applications: Arc<A>,
    projects: Arc<P>,
    profiles: Arc<U>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<A, P, U, N: ?Sized> ApplicationService<A, P, U, N> {
    /// Create a new service with the given collaborators.
    pub fn new(
        applications: Arc<A>,
        projects: Arc<P>,
        profiles: Arc<U>,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            applications,
            projects,
            profiles,
            notifier,
            clock,
        }
    }
}

impl<A, P, U, N: ?Sized> ApplicationService<A, P, U, N>
where
    A: ApplicationRepository,
    P: ProjectRepository,
    U: UserProfileRepository,
    N: EmailNotifier,
{
    async fn find_project(&self, project_id: ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(&project_id)
            .await
            .map_err(map_project_repository_error)?
            .ok_or_else(|| project_not_found(project_id))
    }

    fn check_can_apply(project: &Project, request: &ApplyRequest) -> Result<(), Error> {
        if project.is_owned_by(request.user_id) {
            return Err(Error::forbidden("you cannot apply to your own project"));
        }
        if !project.is_recruiting() {
            return Err(
                Error::conflict("this project is no longer recruiting").with_details(json!({
                    "code": "project_closed",
                })),
            );
        }
        if !project.recruitment().recruits(request.position) {
            return Err(Error::invalid_request(format!(
                "this project is not recruiting a {}",
                request.position
            ))
            .with_details(json!({
                "field": "position",
                "code": "position_not_recruited",
                "value": request.position.as_str(),
            })));
        }
        Ok(())
    }

    async fn notify_owner(&self, project: &Project, application: &Application) {
        let owner_id = project.owner_id();
        let applicant_id = application.key.user_id();
        let profiles = match self.profiles.find_many(&[owner_id, applicant_id]).await {
            Ok(profiles) => profiles,
            Err(err) => {
                warn!(error = %err, project_id = %project.id(), "skipping application email");
                return;
            }
        };
        let by_id: HashMap<UserId, &UserProfile> =
            profiles.iter().map(|profile| (profile.id(), profile)).collect();
        let Some(owner) = by_id.get(&owner_id) else {
            warn!(%owner_id, "project owner has no profile; skipping application email");
            return;
        };
        let email = application_email(
            project,
            owner,
            by_id.get(&applicant_id).copied(),
            application,
        );
        if let Err(err) = self.notifier.send(&email).await {
            warn!(error = %err, project_id = %project.id(), "application email failed");
        }
    }
}

#[async_trait]
impl<A, P, U, N: ?Sized> ApplicationsCommand for ApplicationService<A, P, U, N>
where
    A: ApplicationRepository,
    P: ProjectRepository,
    U: UserProfileRepository,
    N: EmailNotifier,
{
    async fn apply(&self, request: ApplyRequest) -> Result<Application, Error> {
        let message = ApplicationMessage::new(&request.message).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "message",
                "code": "invalid_message",
            }))
        })?;
        let project = self.find_project(request.project_id).await?;
        Self::check_can_apply(&project, &request)?;

        let application = Application {
            key: AssociationKey::new(request.user_id, request.project_id),
            position: request.position,
            message,
            created_at: self.clock.utc(),
        };
        self.applications
            .insert(&application)
            .await
            .map_err(map_application_error)?;
        info!(key = %application.key, position = %application.position, "application recorded");

        self.notify_owner(&project, &application).await;
        Ok(application)
    }

    async fn withdraw(&self, user_id: UserId, project_id: ProjectId) -> Result<(), Error> {
        let key = AssociationKey::new(user_id, project_id);
        let deleted = self
            .applications
            .delete(&key)
            .await
            .map_err(map_application_error)?;
        if !deleted {
            return Err(Error::not_found("you have not applied to this project"));
        }
        info!(%key, "application withdrawn");
        Ok(())
    }
}

#[async_trait]
impl<A, P, U, N: ?Sized> ApplicationsQuery for ApplicationService<A, P, U, N>
where
    A: ApplicationRepository,
    P: ProjectRepository,
    U: UserProfileRepository,
    N: EmailNotifier,
{
    async fn applicants(
        &self,
        owner_id: UserId,
        project_id: ProjectId,
    ) -> Result<Vec<Applicant>, Error> {
        let project = self.find_project(project_id).await?;
        if !project.is_owned_by(owner_id) {
            return Err(Error::forbidden("only the owner may view applicants"));
        }
        let applications = self
            .applications
            .list_for_project(&project_id)
            .await
            .map_err(map_application_error)?;
        let applicant_ids: Vec<UserId> = applications
            .iter()
            .map(|application| application.key.user_id())
            .collect();
        let mut profiles: HashMap<UserId, UserProfile> = self
            .profiles
            .find_many(&applicant_ids)
            .await
            .map_err(map_profile_error)?
            .into_iter()
            .map(|profile| (profile.id(), profile))
            .collect();
        Ok(applications
            .into_iter()
            .map(|application| {
                let profile = profiles.remove(&application.key.user_id());
                Applicant {
                    application,
                    profile,
                }
            })
            .collect())
    }

    async fn applied_projects(
        &self,
        user_id: UserId,
        request: SliceRequest,
    ) -> Result<ProjectSlice, Error> {
        let ids = self
            .applications
            .applied_project_ids(&user_id)
            .await
            .map_err(map_application_error)?;
        load_project_slice(self.projects.as_ref(), &ids, request).await
    }
}

#[cfg(test)]
#[path = "application_service_tests.rs"]
mod tests;
