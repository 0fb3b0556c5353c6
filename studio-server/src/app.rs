use std::sync::Arc;

use anyhow::{Context, Result};
use studio_core::calculations::QuoteEstimator;
use studio_core::db::RepositoryRegistry;
use studio_core::{ContactPipeline, InquiryRepository, Notifier};
use studio_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info};

use crate::config::ServerConfig;

/// Every storage backend this binary can talk to.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Shared, read-only state behind every request handler.
pub struct AppState {
    pub pipeline: ContactPipeline,
    pub repository: Arc<dyn InquiryRepository>,
    pub estimator: QuoteEstimator,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn InquiryRepository>,
        notifier: Arc<dyn Notifier>,
        config: &ServerConfig,
    ) -> Self {
        let mut pipeline =
            ContactPipeline::new(repository.clone(), notifier, config.mail.operator.clone());
        if let Some(limit) = config.submission_timeout() {
            pipeline = pipeline.with_timeout(limit);
        }

        Self {
            pipeline,
            repository,
            estimator: QuoteEstimator::default(),
        }
    }

    /// Open the configured repository and mail transport.
    pub async fn from_config(config: &ServerConfig) -> Result<Arc<Self>> {
        debug!(backend = %config.database.backend, "opening repository");
        let repository: Arc<dyn InquiryRepository> = build_registry()
            .create(&config.database)
            .await
            .with_context(|| {
                format!(
                    "failed to open {} database '{}'",
                    config.database.backend, config.database.connection_string
                )
            })?
            .into();

        let notifier =
            studio_mailer::build_notifier(&config.mail).context("failed to configure mail")?;

        info!(
            backend = %config.database.backend,
            mail = notifier.transport_name(),
            operator = %config.mail.operator,
            "application state ready"
        );
        Ok(Arc::new(Self::new(repository, notifier, config)))
    }
}
