use async_trait::async_trait;
use studio_core::{NotificationError, NotificationMessage, Notifier};
use tracing::info;

/// Writes the message to the log instead of sending it. Used for local
/// development, where no mail provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Notifier for LogMailer {
    fn transport_name(&self) -> &'static str {
        "log"
    }

    async fn send(
        &self,
        message: &NotificationMessage,
    ) -> Result<(), NotificationError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.text,
            "mail not sent (log transport)"
        );
        Ok(())
    }
}
