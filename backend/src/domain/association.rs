//! Like and application records linking a user to a project.
//!
//! Each record is keyed by `"{userId}_{projectId}"`, so a user holds at most
//! one like and one application per project.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{Position, ProjectId, UserId};

/// Maximum application message length, in characters.
pub const APPLICATION_MESSAGE_MAX: usize = 1000;

/// Failures parsing an [`AssociationKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssociationKeyError {
    /// The key did not contain the `_` separator.
    #[error("association key must be userId_projectId")]
    MissingSeparator,
    /// The user half was not a UUID.
    #[error("association key has an invalid user id")]
    InvalidUser,
    /// The project half was not a UUID.
    #[error("association key has an invalid project id")]
    InvalidProject,
}

/// Composite key of a user/project association record.
///
/// # Examples
/// ```
/// use jam_backend::domain::{AssociationKey, ProjectId, UserId};
///
/// let key = AssociationKey::new(UserId::random(), ProjectId::random());
/// let parsed: AssociationKey = key.to_string().parse().expect("round trip");
/// assert_eq!(parsed, key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssociationKey {
    user_id: UserId,
    project_id: ProjectId,
}

impl AssociationKey {
    /// Key for `user_id` and `project_id`.
    #[must_use]
    pub const fn new(user_id: UserId, project_id: ProjectId) -> Self {
        Self {
            user_id,
            project_id,
        }
    }

    /// User half of the key.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Project half of the key.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

impl fmt::Display for AssociationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.user_id, self.project_id)
    }
}

impl FromStr for AssociationKey {
    type Err = AssociationKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Hyphenated UUIDs never contain `_`, so the split is unambiguous.
        let (user, project) = s
            .split_once('_')
            .ok_or(AssociationKeyError::MissingSeparator)?;
        let user_id = UserId::new(user).map_err(|_| AssociationKeyError::InvalidUser)?;
        let project_id =
            ProjectId::new(project).map_err(|_| AssociationKeyError::InvalidProject)?;
        Ok(Self::new(user_id, project_id))
    }
}

/// A user liking a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub key: AssociationKey,
    pub created_at: DateTime<Utc>,
}

/// Outcome of toggling a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    /// The like was created.
    Liked,
    /// The existing like was removed.
    Unliked,
}

impl LikeToggle {
    /// Whether the project is liked after the toggle.
    #[must_use]
    pub const fn is_liked(self) -> bool {
        matches!(self, Self::Liked)
    }
}

/// Validation failures for application messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },
}

/// Message sent to the owner with an application, 1 to 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationMessage(String);

impl ApplicationMessage {
    /// Validate and construct a message.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ApplicationValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApplicationValidationError::EmptyMessage);
        }
        if trimmed.chars().count() > APPLICATION_MESSAGE_MAX {
            return Err(ApplicationValidationError::MessageTooLong {
                max: APPLICATION_MESSAGE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ApplicationMessage {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// A user applying to a project for one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub key: AssociationKey,
    pub position: Position,
    pub message: ApplicationMessage,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn key_formats_user_then_project() {
        let user = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid user");
        let project = ProjectId::new("9b2f1c7e-0d7b-4f0c-8d55-2a4f6f0b1e21").expect("valid id");
        let key = AssociationKey::new(user, project);
        assert_eq!(
            key.to_string(),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6_9b2f1c7e-0d7b-4f0c-8d55-2a4f6f0b1e21"
        );
    }

    #[rstest]
    #[case("no-separator", AssociationKeyError::MissingSeparator)]
    #[case("nope_9b2f1c7e-0d7b-4f0c-8d55-2a4f6f0b1e21", AssociationKeyError::InvalidUser)]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6_nope", AssociationKeyError::InvalidProject)]
    fn malformed_keys_are_rejected(#[case] raw: &str, #[case] expected: AssociationKeyError) {
        assert_eq!(raw.parse::<AssociationKey>(), Err(expected));
    }

    #[rstest]
    #[case("", Err(ApplicationValidationError::EmptyMessage))]
    #[case("   ", Err(ApplicationValidationError::EmptyMessage))]
    #[case("I would love to join", Ok(()))]
    fn message_bounds(#[case] raw: &str, #[case] expected: Result<(), ApplicationValidationError>) {
        assert_eq!(ApplicationMessage::new(raw).map(|_| ()), expected);
    }

    #[rstest]
    fn message_length_is_counted_in_characters() {
        assert!(ApplicationMessage::new("한".repeat(1000)).is_ok());
        assert_eq!(
            ApplicationMessage::new("한".repeat(1001)),
            Err(ApplicationValidationError::MessageTooLong { max: 1000 })
        );
    }
}
