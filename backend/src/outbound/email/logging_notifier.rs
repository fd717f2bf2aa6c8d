//! Email notifier used when no email API is configured.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{EmailNotifier, EmailNotifierError, OutboundEmail};

/// Logs each email instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEmailNotifier;

#[async_trait]
impl EmailNotifier for LoggingEmailNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailNotifierError> {
        info!(
            to = %email.to.as_ref(),
            subject = %email.subject,
            "email delivery disabled; message dropped"
        );
        Ok(())
    }
}
