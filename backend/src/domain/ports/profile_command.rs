//! Driving port for profile mutations.

use async_trait::async_trait;

use crate::domain::{Error, ProfileChanges, SignUpDetails, UserId, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Complete the sign-up form for a signed-in user.
    async fn complete_sign_up(
        &self,
        user_id: UserId,
        details: SignUpDetails,
    ) -> Result<UserProfile, Error>;

    /// Merge the supplied fields into the caller's profile.
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error>;
}
