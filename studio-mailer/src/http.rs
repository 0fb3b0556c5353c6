//! Mail-API transport: one JSON POST per message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use studio_core::{NotificationError, NotificationMessage, Notifier};
use tracing::debug;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Delivers messages through an HTTP mail API that accepts
/// `{from, to, subject, html, text}` and authenticates with a bearer key.
pub struct HttpMailer {
    client: Client,
    endpoint: Url,
    api_key: String,
    from: String,
}

impl HttpMailer {
    /// # Errors
    ///
    /// Returns [`NotificationError::Configuration`] when `endpoint` is not a
    /// valid URL or the HTTP client cannot be constructed.
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            NotificationError::Configuration(format!("invalid mail endpoint '{endpoint}': {e}"))
        })?;
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            NotificationError::Configuration(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            from: from.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    fn transport_name(&self) -> &'static str {
        "http"
    }

    async fn send(
        &self,
        message: &NotificationMessage,
    ) -> Result<(), NotificationError> {
        let request = SendRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to = %message.to, status = status.as_u16(), "mail accepted by provider");
        Ok(())
    }
}

fn map_transport_error(error: reqwest::Error) -> NotificationError {
    if error.is_timeout() {
        NotificationError::Transport(format!("mail request timed out: {error}"))
    } else {
        NotificationError::Transport(format!("mail request failed: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_endpoint() {
        let result = HttpMailer::new("not a url", "key", "from@x.io", Duration::from_secs(1));

        assert!(matches!(result, Err(NotificationError::Configuration(_))));
    }

    #[test]
    fn transport_name_is_http() {
        let mailer = HttpMailer::new(
            "https://mail.example/v1/send",
            "key",
            "from@x.io",
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(mailer.transport_name(), "http");
        assert_eq!(mailer.endpoint().as_str(), "https://mail.example/v1/send");
    }

    #[test]
    fn request_body_uses_provider_field_names() {
        let request = SendRequest {
            from: "Studio <hello@studio.test>",
            to: "inbox@studio.test",
            subject: "New Contact Form Submission",
            html: "<p>hi</p>",
            text: "hi",
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "from": "Studio <hello@studio.test>",
                "to": "inbox@studio.test",
                "subject": "New Contact Form Submission",
                "html": "<p>hi</p>",
                "text": "hi",
            })
        );
    }
}
