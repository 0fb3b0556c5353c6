use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{ContactInquiry, NewContactInquiry, NewPhoneLead, PhoneLead};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Append-only store for everything the site collects.
///
/// Records are never updated or deleted through this trait. Implementations
/// assign the id and the timestamp at write time and must tolerate concurrent
/// appends.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    // Contact inquiries
    async fn create_inquiry(
        &self,
        inquiry: NewContactInquiry,
    ) -> Result<ContactInquiry, RepositoryError>;

    async fn get_inquiry(&self, id: i64) -> Result<ContactInquiry, RepositoryError>;

    /// Inquiries in submission order, optionally only those submitted at or
    /// after `since`.
    async fn list_inquiries(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ContactInquiry>, RepositoryError>;

    // Phone leads
    async fn create_phone_lead(&self, lead: NewPhoneLead) -> Result<PhoneLead, RepositoryError>;

    async fn list_phone_leads(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PhoneLead>, RepositoryError>;
}
