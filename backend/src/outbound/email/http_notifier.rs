//! Reqwest-backed email notifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::domain::Email;
use crate::domain::ports::{EmailNotifier, EmailNotifierError, OutboundEmail};

/// Wire shape accepted by the email API.
#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Email notifier that POSTs each message as JSON to one endpoint.
pub struct HttpEmailNotifier {
    client: Client,
    endpoint: Url,
    sender: Email,
    api_key: Option<String>,
}

impl HttpEmailNotifier {
    /// Build a notifier sending as `sender`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, sender: Email, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            sender,
            api_key: None,
        })
    }

    /// Authenticate requests with a bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn body<'a>(&'a self, email: &'a OutboundEmail) -> SendEmailBody<'a> {
        SendEmailBody {
            from: self.sender.as_ref(),
            to: email.to.as_ref(),
            subject: &email.subject,
            text: &email.body,
        }
    }
}

#[async_trait]
impl EmailNotifier for HttpEmailNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailNotifierError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&self.body(email));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|err| EmailNotifierError::transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }
}

fn map_status_error(status: StatusCode, body: &str) -> EmailNotifierError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let preview: String = body.trim().chars().take(PREVIEW_CHAR_LIMIT).collect();
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    EmailNotifierError::rejected(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn notifier() -> HttpEmailNotifier {
        HttpEmailNotifier::new(
            Url::parse("https://mail.example.com/v1/send").expect("url"),
            Email::new("noreply@jam.example.com").expect("sender"),
            Duration::from_secs(5),
        )
        .expect("client")
    }

    #[rstest]
    fn body_serialises_sender_and_recipient() {
        let notifier = notifier();
        let email = OutboundEmail {
            to: Email::new("owner@example.com").expect("recipient"),
            subject: "New applicant".to_owned(),
            body: "Someone applied".to_owned(),
        };
        let json = serde_json::to_value(notifier.body(&email)).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "from": "noreply@jam.example.com",
                "to": "owner@example.com",
                "subject": "New applicant",
                "text": "Someone applied",
            })
        );
    }

    #[rstest]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, "invalid recipient", "invalid recipient")]
    #[case(StatusCode::SERVICE_UNAVAILABLE, "  ", "Service Unavailable")]
    fn status_errors_keep_status_and_reason(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            map_status_error(status, body),
            EmailNotifierError::rejected(status.as_u16(), expected)
        );
    }
}
