//! Outbound notification of new inquiries to the studio's operator.

use async_trait::async_trait;
use html_escape::encode_safe;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ContactInquiry;

pub const INQUIRY_SUBJECT: &str = "New Contact Form Submission";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rejected by mail service (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A single outbound message. Both bodies carry the same content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl NotificationMessage {
    /// Summary of an inquiry (name, email, message and whatever optional
    /// details were given) addressed to `operator`.
    pub fn for_inquiry(
        inquiry: &ContactInquiry,
        operator: &str,
    ) -> Self {
        let mut details = vec![("Name", inquiry.name.clone()), ("Email", inquiry.email.clone())];
        if let Some(phone) = &inquiry.phone {
            details.push(("Phone", phone.clone()));
        }
        if let Some(project_type) = inquiry.project_type {
            details.push(("Project type", project_type.as_str().to_string()));
        }
        if let Some(budget) = &inquiry.budget {
            details.push(("Budget", budget.clone()));
        }
        if let Some(timeline) = &inquiry.timeline {
            details.push(("Timeline", timeline.clone()));
        }

        let mut html = String::new();
        let mut text = String::new();
        for (label, value) in &details {
            html.push_str(&format!(
                "<p><strong>{label}:</strong> {}</p>\n",
                encode_safe(value)
            ));
            text.push_str(&format!("{label}: {value}\n"));
        }
        html.push_str(&format!(
            "<p><strong>Message:</strong><br/>{}</p>\n",
            encode_safe(&inquiry.message).replace('\n', "<br/>")
        ));
        text.push_str(&format!("\nMessage:\n{}\n", inquiry.message));

        Self {
            to: operator.to_string(),
            subject: INQUIRY_SUBJECT.to_string(),
            html,
            text,
        }
    }
}

/// Delivers notification messages. One call is one delivery attempt;
/// retrying is up to the implementation.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name used in logs (e.g. `"http"`, `"log"`).
    fn transport_name(&self) -> &'static str;

    async fn send(
        &self,
        message: &NotificationMessage,
    ) -> Result<(), NotificationError>;
}
