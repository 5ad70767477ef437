use std::sync::Arc;

use dealerdesk_common::DealerDeskError;
use dealerdesk_config::AppConfig;
use dealerdesk_db::{
    DbClient, DbClientFactory, DbError, FormSubmission, FormSubmissionRepository,
    InMemoryFormSubmissionRepository, NewFormSubmission, SqlFormSubmissionRepository,
};
use tracing::{info, warn};

/// Where form submissions are kept, chosen once at startup.
#[derive(Debug, Clone)]
pub enum SubmissionStore {
    Sql(SqlFormSubmissionRepository),
    /// Used when no database is configured. Lost on restart.
    Memory(InMemoryFormSubmissionRepository),
}

impl FormSubmissionRepository for SubmissionStore {
    async fn init_schema(&self) -> Result<(), DbError> {
        match self {
            SubmissionStore::Sql(repo) => repo.init_schema().await,
            SubmissionStore::Memory(repo) => repo.init_schema().await,
        }
    }

    async fn create(&self, submission: NewFormSubmission) -> Result<FormSubmission, DbError> {
        match self {
            SubmissionStore::Sql(repo) => repo.create(submission).await,
            SubmissionStore::Memory(repo) => repo.create(submission).await,
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FormSubmission>, DbError> {
        match self {
            SubmissionStore::Sql(repo) => repo.find_by_id(id).await,
            SubmissionStore::Memory(repo) => repo.find_by_id(id).await,
        }
    }

    async fn find_all(&self) -> Result<Vec<FormSubmission>, DbError> {
        match self {
            SubmissionStore::Sql(repo) => repo.find_all().await,
            SubmissionStore::Memory(repo) => repo.find_all().await,
        }
    }
}

/// Application state shared by the router and the shutdown path.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub submissions: SubmissionStore,
    db_client: Option<DbClient>,
}

impl AppState {
    /// Connect to the configured database and create the schema. Without a
    /// `database` section submissions are kept in memory.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, DealerDeskError> {
        let db_client = DbClientFactory::new()
            .from_app_config(&config)
            .await
            .map_err(|e| DealerDeskError::DatabaseError(e.to_string()))?;

        let submissions = match &db_client {
            Some(client) => {
                info!("Storing form submissions in the configured database");
                SubmissionStore::Sql(SqlFormSubmissionRepository::new(client.clone()))
            }
            None => {
                warn!("No database configured; form submissions are kept in memory only");
                SubmissionStore::Memory(InMemoryFormSubmissionRepository::new())
            }
        };

        submissions
            .init_schema()
            .await
            .map_err(|e| DealerDeskError::DatabaseError(e.to_string()))?;

        Ok(Self {
            config,
            submissions,
            db_client,
        })
    }

    /// State backed by in-memory storage, whatever the configuration says.
    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            submissions: SubmissionStore::Memory(InMemoryFormSubmissionRepository::new()),
            db_client: None,
        }
    }

    /// Release the database pool, if any.
    pub async fn close(&self) {
        if let Some(client) = &self.db_client {
            client.close().await;
        }
    }
}
