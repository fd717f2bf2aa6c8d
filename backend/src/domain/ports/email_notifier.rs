//! Port for transactional email delivery.

use async_trait::async_trait;

use crate::domain::Email;

use super::define_port_error;

define_port_error! {
    /// Errors raised by email delivery adapters.
    pub enum EmailNotifierError {
        /// The email service could not be reached.
        Transport { message: String } => "email transport failed: {message}",
        /// The email service refused the message.
        Rejected { status: u16, message: String } =>
            "email service rejected message with status {status}: {message}",
    }
}

/// A rendered transactional email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Email,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Deliver one email.
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailNotifierError>;
}

/// Fixture notifier that drops every email.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmailNotifier;

#[async_trait]
impl EmailNotifier for FixtureEmailNotifier {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), EmailNotifierError> {
        Ok(())
    }
}
