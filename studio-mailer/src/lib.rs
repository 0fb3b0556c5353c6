//! [`Notifier`] transports for operator notifications.

mod http;
mod log;
mod smtp;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use studio_core::{NotificationError, Notifier};

pub use http::HttpMailer;
pub use log::LogMailer;
pub use smtp::{DEFAULT_PASSWORD_ENV, SmtpConfig, SmtpMailer, SmtpSecurity};

pub const DEFAULT_API_KEY_ENV: &str = "STUDIO_MAIL_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    Http,
    Smtp,
    #[default]
    Log,
}

/// The `[mail]` section of the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    pub transport: MailTransport,
    /// Mail API URL. Required for the `http` transport.
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the API key. The key itself
    /// never lives in the config file.
    pub api_key_env: String,
    /// Relay settings for the `smtp` transport.
    pub smtp: SmtpConfig,
    pub from: String,
    /// Inbox that receives inquiry notifications.
    pub operator: String,
    pub timeout_secs: u64,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::Log,
            endpoint: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            smtp: SmtpConfig::default(),
            from: "Studio PARSA <hello@studioparsa.in>".to_string(),
            operator: "inbox@studioparsa.in".to_string(),
            timeout_secs: 10,
        }
    }
}

impl MailerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Build the transport selected by `config`.
///
/// # Errors
/// [`NotificationError::Configuration`] when the `http` transport has no
/// endpoint or API key, or the `smtp` transport has a username but no
/// password. The key and password variables must be set and non-empty.
pub fn build_notifier(config: &MailerConfig) -> Result<Arc<dyn Notifier>, NotificationError> {
    match config.transport {
        MailTransport::Log => Ok(Arc::new(LogMailer)),
        MailTransport::Http => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                NotificationError::Configuration(
                    "mail.endpoint is required for the http transport".to_string(),
                )
            })?;
            let api_key = secret_from_env(&config.api_key_env)?;

            let mailer = HttpMailer::new(endpoint, api_key, &config.from, config.timeout())?;
            Ok(Arc::new(mailer))
        }
        MailTransport::Smtp => {
            let password = match config.smtp.username {
                Some(_) => Some(secret_from_env(&config.smtp.password_env)?),
                None => None,
            };

            let mailer = SmtpMailer::new(&config.smtp, password, &config.from, config.timeout())?;
            Ok(Arc::new(mailer))
        }
    }
}

fn secret_from_env(name: &str) -> Result<String, NotificationError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            NotificationError::Configuration(format!("environment variable {name} is not set"))
        })
}
