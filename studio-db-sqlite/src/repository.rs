use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use studio_core::{
    ContactInquiry, InquiryForm, InquiryRepository, NewContactInquiry, NewPhoneLead, PhoneLead,
    ProjectType, RepositoryError,
};
use tracing::debug;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect to `database_url`, creating the database file if it does not
    /// exist yet.
    ///
    /// Accepts a bare path (`studio.db`), a sqlx URL (`sqlite:studio.db`) or
    /// `:memory:`. An in-memory database keeps one connection open for the
    /// lifetime of the pool so its contents are not dropped when the pool
    /// goes idle.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Configuration(format!("{database_url}: {e}")))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{database_url}: {e}")))?;

        debug!(database_url, "connected to sqlite");
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to run migrations: {e}")))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(e.to_string())
        }
        other => RepositoryError::Database(other.to_string()),
    }
}

#[derive(FromRow)]
struct ContactInquiryRow {
    id: i64,
    form: String,
    name: String,
    email: String,
    message: String,
    phone: Option<String>,
    project_type: Option<String>,
    budget: Option<String>,
    timeline: Option<String>,
    submitted_at: DateTime<Utc>,
}

impl TryFrom<ContactInquiryRow> for ContactInquiry {
    type Error = RepositoryError;

    fn try_from(row: ContactInquiryRow) -> Result<Self, Self::Error> {
        let form = InquiryForm::parse(&row.form)
            .ok_or_else(|| RepositoryError::Database(format!("Invalid form: {}", row.form)))?;
        let project_type = row
            .project_type
            .map(|raw| {
                ProjectType::parse(&raw)
                    .ok_or_else(|| RepositoryError::Database(format!("Invalid project type: {raw}")))
            })
            .transpose()?;

        Ok(ContactInquiry {
            id: row.id,
            form,
            name: row.name,
            email: row.email,
            message: row.message,
            phone: row.phone,
            project_type,
            budget: row.budget,
            timeline: row.timeline,
            submitted_at: row.submitted_at,
        })
    }
}

#[derive(FromRow)]
struct PhoneLeadRow {
    id: i64,
    country: String,
    national_number: String,
    e164: String,
    captured_at: DateTime<Utc>,
}

impl From<PhoneLeadRow> for PhoneLead {
    fn from(row: PhoneLeadRow) -> Self {
        PhoneLead {
            id: row.id,
            country: row.country,
            national_number: row.national_number,
            e164: row.e164,
            captured_at: row.captured_at,
        }
    }
}

const INQUIRY_COLUMNS: &str = "id, form, name, email, message, phone, project_type, budget, \
                               timeline, submitted_at";

#[async_trait]
impl InquiryRepository for SqliteRepository {
    async fn create_inquiry(
        &self,
        inquiry: NewContactInquiry,
    ) -> Result<ContactInquiry, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO contact_inquiries (
                form, name, email, message, phone, project_type, budget, timeline, submitted_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(inquiry.form.as_str())
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.message)
        .bind(&inquiry.phone)
        .bind(inquiry.project_type.map(|t| t.as_str()))
        .bind(&inquiry.budget)
        .bind(&inquiry.timeline)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(ContactInquiry {
            id: result.last_insert_rowid(),
            form: inquiry.form,
            name: inquiry.name,
            email: inquiry.email,
            message: inquiry.message,
            phone: inquiry.phone,
            project_type: inquiry.project_type,
            budget: inquiry.budget,
            timeline: inquiry.timeline,
            submitted_at: now,
        })
    }

    async fn get_inquiry(
        &self,
        id: i64,
    ) -> Result<ContactInquiry, RepositoryError> {
        let sql = format!("SELECT {INQUIRY_COLUMNS} FROM contact_inquiries WHERE id = ?");
        let row: ContactInquiryRow = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
            .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn list_inquiries(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ContactInquiry>, RepositoryError> {
        let filtered = format!(
            "SELECT {INQUIRY_COLUMNS} FROM contact_inquiries WHERE submitted_at >= ? ORDER BY id"
        );
        let all = format!("SELECT {INQUIRY_COLUMNS} FROM contact_inquiries ORDER BY id");

        let rows: Vec<ContactInquiryRow> = match since {
            Some(since) => {
                sqlx::query_as(&filtered)
                    .bind(since)
                    .fetch_all(&self.pool)
                    .await
            }
            None => sqlx::query_as(&all).fetch_all(&self.pool).await,
        }
        .map_err(db_error)?;

        rows.into_iter().map(ContactInquiry::try_from).collect()
    }

    async fn create_phone_lead(
        &self,
        lead: NewPhoneLead,
    ) -> Result<PhoneLead, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO phone_leads (country, national_number, e164, captured_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&lead.country)
        .bind(&lead.national_number)
        .bind(&lead.e164)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(PhoneLead {
            id: result.last_insert_rowid(),
            country: lead.country,
            national_number: lead.national_number,
            e164: lead.e164,
            captured_at: now,
        })
    }

    async fn list_phone_leads(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PhoneLead>, RepositoryError> {
        let rows: Vec<PhoneLeadRow> = match since {
            Some(since) => {
                sqlx::query_as(
                    "SELECT id, country, national_number, e164, captured_at
                     FROM phone_leads WHERE captured_at >= ? ORDER BY id",
                )
                .bind(since)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, country, national_number, e164, captured_at
                     FROM phone_leads ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_error)?;

        Ok(rows.into_iter().map(PhoneLead::from).collect())
    }
}
