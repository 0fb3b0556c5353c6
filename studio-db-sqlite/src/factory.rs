use async_trait::async_trait;

use studio_core::InquiryRepository;
use studio_core::RepositoryError;
use studio_core::db::{DbConfig, RepositoryFactory};
use tracing::info;

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`studio_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use studio_core::db::RepositoryRegistry;
/// use studio_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted connection-string values:
    /// * A bare file path, e.g. `"studio.db"`. The file is created if it
    ///   does not exist.
    /// * A sqlx URL, e.g. `"sqlite:studio.db?mode=rwc"`.
    /// * `":memory:"`, an ephemeral in-memory database (useful for tests).
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn InquiryRepository>, RepositoryError> {
        let repo = SqliteRepository::connect(&config.connection_string).await?;
        repo.run_migrations().await?;
        info!(
            connection_string = %config.connection_string,
            "sqlite repository ready"
        );
        Ok(Box::new(repo))
    }
}
