//! User identity and profile model.
//!
//! A profile is created as a skeleton on first sign-in and completed by the
//! sign-up form. Later edits use merge semantics: only supplied fields change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::keyword::keyword_enum;
use super::WebUrl;

/// Namespace for deriving user ids from identity provider subjects.
const PROVIDER_SUBJECT_NAMESPACE: Uuid = Uuid::from_u128(0x5c1e_6a3b_0d2f_4f4e_9a07_2b8c_11d4_e7a9);

/// Maximum length of a display name, in characters.
pub const DISPLAY_NAME_MAX: usize = 32;
/// Maximum length of a self-introduction, in characters.
pub const INTRODUCTION_MAX: usize = 500;

/// Validation errors raised by user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The display name was blank.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// The display name exceeded [`DISPLAY_NAME_MAX`].
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// Upper bound.
        max: usize,
    },
    /// The email address was malformed.
    #[error("email must look like name@domain")]
    InvalidEmail,
    /// The introduction exceeded [`INTRODUCTION_MAX`].
    #[error("introduction must be at most {max} characters")]
    IntroductionTooLong {
        /// Upper bound.
        max: usize,
    },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive the id owned by an identity provider subject.
    ///
    /// The mapping is deterministic so repeated sign-ins land on the same
    /// profile.
    ///
    /// # Examples
    /// ```
    /// use jam_backend::domain::UserId;
    ///
    /// let first = UserId::from_provider_subject("google", "10769150350006150715113082367");
    /// let again = UserId::from_provider_subject("google", "10769150350006150715113082367");
    /// assert_eq!(first, again);
    /// ```
    #[must_use]
    pub fn from_provider_subject(provider: &str, subject: &str) -> Self {
        let name = format!("{provider}:{subject}");
        Self(Uuid::new_v5(&PROVIDER_SUBJECT_NAMESPACE, name.as_bytes()))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name, 1 to 32 characters once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Like [`DisplayName::new`], but cuts over-long names down to size.
    pub fn truncated(display_name: &str) -> Result<Self, UserValidationError> {
        Self::new(
            display_name
                .trim()
                .chars()
                .take(DISPLAY_NAME_MAX)
                .collect::<String>(),
        )
    }

    /// Name derived from the local part of `email`.
    #[must_use]
    pub fn from_email(email: &Email) -> Self {
        let local = email.as_ref().split('@').next().unwrap_or_default();
        Self(local.chars().take(DISPLAY_NAME_MAX).collect())
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used for application notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// Only the shape is checked: exactly one `@` with non-empty parts and no
    /// whitespace. Deliverability is the identity provider's concern.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        let mut parts = trimmed.split('@');
        let shape_ok = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !shape_ok || trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

keyword_enum! {
    /// Role a person plays on a team; also the unit of recruitment.
    pub enum Position {
        error = ParsePositionError,
        label = "position",
        /// Web client development.
        Frontend => "frontend",
        /// Server development.
        Backend => "backend",
        /// Both sides of the stack.
        Fullstack => "fullstack",
        /// Product and visual design.
        Designer => "designer",
        /// Product planning.
        Planner => "planner",
        /// Native or cross-platform mobile development.
        Mobile => "mobile",
        /// Infrastructure and operations.
        Devops => "devops",
        /// Machine learning and data work.
        Ai => "ai",
    }
}

keyword_enum! {
    /// Self-reported experience tier.
    pub enum ExperienceTier {
        error = ParseExperienceTierError,
        label = "experience tier",
        /// Learning the basics.
        Beginner => "beginner",
        /// Up to roughly three years.
        Junior => "junior",
        /// Mid-level.
        Mid => "mid",
        /// Senior.
        Senior => "senior",
    }
}

/// Free-form self-introduction of at most 500 characters; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Introduction(String);

impl Introduction {
    /// Validate and construct an [`Introduction`].
    pub fn new(text: impl Into<String>) -> Result<Self, UserValidationError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.chars().count() > INTRODUCTION_MAX {
            return Err(UserValidationError::IntroductionTooLong {
                max: INTRODUCTION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Introduction {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Introduction> for String {
    fn from(value: Introduction) -> Self {
        value.0
    }
}

impl TryFrom<String> for Introduction {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Fields collected by the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    pub display_name: DisplayName,
    pub position: Position,
    pub experience: ExperienceTier,
    pub introduction: Introduction,
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub display_name: Option<DisplayName>,
    pub photo_url: Option<WebUrl>,
    pub position: Option<Position>,
    pub experience: Option<ExperienceTier>,
    pub introduction: Option<Introduction>,
}

impl ProfileChanges {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Stored user profile.
///
/// ## Invariants
/// - `onboarded` is true only once position and experience are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    id: UserId,
    display_name: DisplayName,
    email: Email,
    photo_url: Option<WebUrl>,
    position: Option<Position>,
    experience: Option<ExperienceTier>,
    introduction: Introduction,
    onboarded: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Every field of a stored profile, used by persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileRecord {
    pub id: UserId,
    pub display_name: DisplayName,
    pub email: Email,
    pub photo_url: Option<WebUrl>,
    pub position: Option<Position>,
    pub experience: Option<ExperienceTier>,
    pub introduction: Introduction,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create the skeleton profile written on first sign-in.
    #[must_use]
    pub fn skeleton(
        id: UserId,
        display_name: DisplayName,
        email: Email,
        photo_url: Option<WebUrl>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            display_name,
            email,
            photo_url,
            position: None,
            experience: None,
            introduction: Introduction::default(),
            onboarded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a profile from stored fields.
    ///
    /// A record claiming to be onboarded without position or experience is
    /// downgraded so the sign-up form is shown again.
    #[must_use]
    pub fn from_record(record: UserProfileRecord) -> Self {
        let UserProfileRecord {
            id,
            display_name,
            email,
            photo_url,
            position,
            experience,
            introduction,
            onboarded,
            created_at,
            updated_at,
        } = record;
        Self {
            id,
            display_name,
            email,
            photo_url,
            position,
            experience,
            introduction,
            onboarded: onboarded && position.is_some() && experience.is_some(),
            created_at,
            updated_at,
        }
    }

    /// Apply the sign-up form and mark the profile as onboarded.
    pub fn complete_sign_up(&mut self, details: SignUpDetails, now: DateTime<Utc>) {
        let SignUpDetails {
            display_name,
            position,
            experience,
            introduction,
        } = details;
        self.display_name = display_name;
        self.position = Some(position);
        self.experience = Some(experience);
        self.introduction = introduction;
        self.onboarded = true;
        self.updated_at = now;
    }

    /// Merge the supplied fields into the profile.
    pub fn apply(&mut self, changes: ProfileChanges, now: DateTime<Utc>) {
        let ProfileChanges {
            display_name,
            photo_url,
            position,
            experience,
            introduction,
        } = changes;
        if let Some(value) = display_name {
            self.display_name = value;
        }
        if let Some(value) = photo_url {
            self.photo_url = Some(value);
        }
        if let Some(value) = position {
            self.position = Some(value);
        }
        if let Some(value) = experience {
            self.experience = Some(value);
        }
        if let Some(value) = introduction {
            self.introduction = value;
        }
        self.onboarded = self.onboarded && self.position.is_some() && self.experience.is_some();
        self.updated_at = now;
    }

    /// Profile identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Contact email from the identity provider.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Profile photo, if any.
    pub fn photo_url(&self) -> Option<&WebUrl> {
        self.photo_url.as_ref()
    }

    /// Preferred position.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Experience tier.
    pub fn experience(&self) -> Option<ExperienceTier> {
        self.experience
    }

    /// Self-introduction.
    pub fn introduction(&self) -> &Introduction {
        &self.introduction
    }

    /// Whether the sign-up form has been completed.
    pub fn onboarded(&self) -> bool {
        self.onboarded
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy every field into a record for persistence.
    #[must_use]
    pub fn to_record(&self) -> UserProfileRecord {
        UserProfileRecord {
            id: self.id,
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            photo_url: self.photo_url.clone(),
            position: self.position,
            experience: self.experience,
            introduction: self.introduction.clone(),
            onboarded: self.onboarded,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests;
