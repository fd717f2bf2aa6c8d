//! In-memory document store implementing every persistence port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. All documents sit behind one mutex, so each port call, including
//! a like toggle, is applied atomically.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, LikeRepository, LikeRepositoryError,
    ProjectListQuery, ProjectRepository, ProjectRepositoryError, UserProfileRepository,
    UserProfileRepositoryError,
};
use crate::domain::{
    Application, AssociationKey, Like, LikeToggle, Project, ProjectCursorKey, ProjectId, UserId,
    UserProfile,
};

#[derive(Debug, Default)]
struct Documents {
    projects: HashMap<ProjectId, Project>,
    profiles: HashMap<UserId, UserProfile>,
    likes: BTreeMap<AssociationKey, Like>,
    applications: BTreeMap<AssociationKey, Application>,
}

impl Documents {
    fn ids_newest_first<'a>(
        records: impl Iterator<Item = (&'a AssociationKey, DateTime<Utc>)>,
        user: UserId,
    ) -> Vec<ProjectId> {
        let mut matches: Vec<(DateTime<Utc>, ProjectId)> = records
            .filter(|(key, _)| key.user_id() == user)
            .map(|(key, created_at)| (created_at, key.project_id()))
            .collect();
        matches.sort_by(|a, b| b.cmp(a));
        matches.into_iter().map(|(_, id)| id).collect()
    }
}

/// Shared in-memory store; clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<Documents>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Documents> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut docs = self.lock();
        if docs.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::duplicate(project.id().to_string()));
        }
        docs.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn save(&self, project: &Project) -> Result<bool, ProjectRepositoryError> {
        let mut docs = self.lock();
        let Some(stored) = docs.projects.get_mut(&project.id()) else {
            return Ok(false);
        };
        let mut record = project.to_record();
        record.like_count = stored.like_count();
        record.view_count = stored.view_count();
        *stored = Project::from_record(record)
            .map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
        Ok(true)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self.lock().projects.get(id).cloned())
    }

    async fn record_view(
        &self,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut docs = self.lock();
        Ok(docs.projects.get_mut(id).map(|project| {
            project.record_view();
            project.clone()
        }))
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut docs = self.lock();
        if docs.projects.remove(id).is_none() {
            return Ok(false);
        }
        docs.likes.retain(|key, _| key.project_id() != *id);
        docs.applications.retain(|key, _| key.project_id() != *id);
        Ok(true)
    }

    async fn list(&self, query: &ProjectListQuery) -> Result<Vec<Project>, ProjectRepositoryError> {
        let docs = self.lock();
        let sort = query.filter.sort;
        let mut keyed: Vec<(ProjectCursorKey, &Project)> = docs
            .projects
            .values()
            .filter(|project| query.filter.matches(project))
            .map(|project| (ProjectCursorKey::for_project(sort, project), project))
            .filter(|(key, _)| query.after.is_none_or(|after| after.precedes(key)))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| a.listing_cmp(b));
        Ok(keyed
            .into_iter()
            .take(query.limit)
            .map(|(_, project)| project.clone())
            .collect())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        let docs = self.lock();
        let mut owned: Vec<Project> = docs
            .projects
            .values()
            .filter(|project| project.is_owned_by(*owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(owned)
    }

    async fn find_many(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectRepositoryError> {
        let docs = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| docs.projects.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl UserProfileRepository for MemoryStore {
    async fn save(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        self.lock().profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<UserProfile, UserProfileRepositoryError> {
        Ok(self
            .lock()
            .profiles
            .entry(profile.id())
            .or_insert_with(|| profile.clone())
            .clone())
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        Ok(self.lock().profiles.get(id).cloned())
    }

    async fn find_many(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        let docs = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| docs.profiles.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn exists(&self, key: &AssociationKey) -> Result<bool, LikeRepositoryError> {
        Ok(self.lock().likes.contains_key(key))
    }

    async fn toggle(
        &self,
        key: &AssociationKey,
        now: DateTime<Utc>,
    ) -> Result<LikeToggle, LikeRepositoryError> {
        let mut docs = self.lock();
        let Documents {
            projects, likes, ..
        } = &mut *docs;
        let project = projects
            .get_mut(&key.project_id())
            .ok_or_else(|| LikeRepositoryError::missing_project(key.project_id().to_string()))?;
        let outcome = if likes.remove(key).is_some() {
            LikeToggle::Unliked
        } else {
            likes.insert(
                *key,
                Like {
                    key: *key,
                    created_at: now,
                },
            );
            LikeToggle::Liked
        };
        project.record_like(outcome.is_liked());
        Ok(outcome)
    }

    async fn liked_project_ids(
        &self,
        user: &UserId,
    ) -> Result<Vec<ProjectId>, LikeRepositoryError> {
        let docs = self.lock();
        Ok(Documents::ids_newest_first(
            docs.likes.iter().map(|(key, like)| (key, like.created_at)),
            *user,
        ))
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut docs = self.lock();
        let key = application.key;
        if !docs.projects.contains_key(&key.project_id()) {
            return Err(ApplicationRepositoryError::query(format!(
                "project {} no longer exists",
                key.project_id()
            )));
        }
        if docs.applications.contains_key(&key) {
            return Err(ApplicationRepositoryError::duplicate(key.to_string()));
        }
        docs.applications.insert(key, application.clone());
        Ok(())
    }

    async fn delete(&self, key: &AssociationKey) -> Result<bool, ApplicationRepositoryError> {
        Ok(self.lock().applications.remove(key).is_some())
    }

    async fn find(
        &self,
        key: &AssociationKey,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self.lock().applications.get(key).cloned())
    }

    async fn list_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let docs = self.lock();
        let mut found: Vec<Application> = docs
            .applications
            .values()
            .filter(|application| application.key.project_id() == *project)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.key.cmp(&b.key))
        });
        Ok(found)
    }

    async fn applied_project_ids(
        &self,
        user: &UserId,
    ) -> Result<Vec<ProjectId>, ApplicationRepositoryError> {
        let docs = self.lock();
        Ok(Documents::ids_newest_first(
            docs.applications
                .iter()
                .map(|(key, application)| (key, application.created_at)),
            *user,
        ))
    }
}
