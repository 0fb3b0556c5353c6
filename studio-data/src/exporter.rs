use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use studio_core::{ContactInquiry, InquiryRepository, PhoneLead, RepositoryError};
use thiserror::Error;

/// Errors that can occur when exporting collected inquiries.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

const INQUIRY_HEADERS: [&str; 10] = [
    "id",
    "submitted_at",
    "form",
    "name",
    "email",
    "phone",
    "project_type",
    "budget",
    "timeline",
    "message",
];

const PHONE_LEAD_HEADERS: [&str; 5] = ["id", "captured_at", "country", "national_number", "e164"];

/// One CSV row per stored inquiry. Absent optional fields are empty cells.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InquiryRecord {
    pub id: i64,
    pub submitted_at: String,
    pub form: &'static str,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_type: Option<&'static str>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub message: String,
}

impl From<&ContactInquiry> for InquiryRecord {
    fn from(inquiry: &ContactInquiry) -> Self {
        Self {
            id: inquiry.id,
            submitted_at: timestamp(inquiry.submitted_at),
            form: inquiry.form.as_str(),
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            phone: inquiry.phone.clone(),
            project_type: inquiry.project_type.map(|t| t.as_str()),
            budget: inquiry.budget.clone(),
            timeline: inquiry.timeline.clone(),
            message: inquiry.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PhoneLeadRecord {
    pub id: i64,
    pub captured_at: String,
    pub country: String,
    pub national_number: String,
    pub e164: String,
}

impl From<&PhoneLead> for PhoneLeadRecord {
    fn from(lead: &PhoneLead) -> Self {
        Self {
            id: lead.id,
            captured_at: timestamp(lead.captured_at),
            country: lead.country.clone(),
            national_number: lead.national_number.clone(),
            e164: lead.e164.clone(),
        }
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Writes collected inquiries and phone leads as CSV.
///
/// Every export starts with a header row, so an empty export is still a
/// valid file with the expected columns.
pub struct InquiryExporter;

impl InquiryExporter {
    /// Write `inquiries` to `writer`. Returns the number of data rows.
    pub fn write_inquiries<W: Write>(
        writer: W,
        inquiries: &[ContactInquiry],
    ) -> Result<usize, ExportError> {
        let records = inquiries.iter().map(InquiryRecord::from);
        write_csv(writer, &INQUIRY_HEADERS, records)
    }

    /// Write `leads` to `writer`. Returns the number of data rows.
    pub fn write_phone_leads<W: Write>(
        writer: W,
        leads: &[PhoneLead],
    ) -> Result<usize, ExportError> {
        let records = leads.iter().map(PhoneLeadRecord::from);
        write_csv(writer, &PHONE_LEAD_HEADERS, records)
    }

    /// Read inquiries submitted at or after `since` from `repo` and write them.
    pub async fn export_inquiries<R, W>(
        repo: &R,
        since: Option<DateTime<Utc>>,
        writer: W,
    ) -> Result<usize, ExportError>
    where
        R: InquiryRepository + ?Sized,
        W: Write,
    {
        let inquiries = repo.list_inquiries(since).await?;
        Self::write_inquiries(writer, &inquiries)
    }

    /// Read phone leads captured at or after `since` from `repo` and write them.
    pub async fn export_phone_leads<R, W>(
        repo: &R,
        since: Option<DateTime<Utc>>,
        writer: W,
    ) -> Result<usize, ExportError>
    where
        R: InquiryRepository + ?Sized,
        W: Write,
    {
        let leads = repo.list_phone_leads(since).await?;
        Self::write_phone_leads(writer, &leads)
    }
}

fn write_csv<W, T, I>(
    writer: W,
    headers: &[&str],
    records: I,
) -> Result<usize, ExportError>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(headers)?;

    let mut written = 0;
    for record in records {
        csv_writer.serialize(record)?;
        written += 1;
    }
    csv_writer.flush()?;

    Ok(written)
}
