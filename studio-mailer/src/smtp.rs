//! SMTP relay transport (e.g. Gmail with an app password).

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use studio_core::{NotificationError, NotificationMessage, Notifier};
use tracing::debug;

pub const DEFAULT_PASSWORD_ENV: &str = "STUDIO_SMTP_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS (port 587).
    #[default]
    Starttls,
    /// TLS from the first byte (port 465).
    Tls,
    /// No encryption. Only for relays on a trusted network.
    Plain,
}

/// The `[mail.smtp]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    /// Login for the relay. Without one the relay is used unauthenticated.
    pub username: Option<String>,
    /// Name of the environment variable holding the password.
    pub password_env: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            security: SmtpSecurity::Starttls,
            username: None,
            password_env: DEFAULT_PASSWORD_ENV.to_string(),
        }
    }
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// # Errors
    ///
    /// Returns [`NotificationError::Configuration`] when `from` is not a
    /// mailbox or the relay host cannot be used for TLS.
    pub fn new(
        config: &SmtpConfig,
        password: Option<String>,
        from: &str,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let from: Mailbox = from.parse().map_err(|e| {
            NotificationError::Configuration(format!("invalid sender '{from}': {e}"))
        })?;

        let builder = match config.security {
            SmtpSecurity::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpSecurity::Plain => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                &config.host,
            )),
        }
        .map_err(|e| {
            NotificationError::Configuration(format!("invalid smtp relay '{}': {e}", config.host))
        })?;

        let mut builder = builder.port(config.port).timeout(Some(timeout));
        if let (Some(username), Some(password)) = (&config.username, password) {
            builder = builder.credentials(Credentials::new(username.clone(), password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(
        &self,
        message: &NotificationMessage,
    ) -> Result<Message, NotificationError> {
        let to: Mailbox = message.to.parse().map_err(|e| {
            NotificationError::Configuration(format!("invalid recipient '{}': {e}", message.to))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                message.text.clone(),
                message.html.clone(),
            ))
            .map_err(|e| NotificationError::Transport(format!("failed to build message: {e}")))
    }
}

#[async_trait]
impl Notifier for SmtpMailer {
    fn transport_name(&self) -> &'static str {
        "smtp"
    }

    async fn send(
        &self,
        message: &NotificationMessage,
    ) -> Result<(), NotificationError> {
        let email = self.build_message(message)?;

        let response = self.transport.send(email).await.map_err(|e| {
            if e.is_timeout() {
                NotificationError::Transport(format!("smtp delivery timed out: {e}"))
            } else {
                NotificationError::Transport(format!("smtp delivery failed: {e}"))
            }
        })?;

        debug!(to = %message.to, code = %response.code(), "mail accepted by relay");
        Ok(())
    }
}
