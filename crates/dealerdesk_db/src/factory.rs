//! Factory for creating database clients

use crate::client::DbClient;
use crate::error::DbError;
use dealerdesk_config::AppConfig;
use tracing::debug;

/// Factory for creating database clients from the different configuration
/// sources the services use.
#[derive(Debug, Clone)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Connect using the `database` section of the application configuration.
    ///
    /// Returns `Ok(None)` when no database is configured so callers can fall
    /// back to in-memory storage.
    pub async fn from_app_config(&self, config: &AppConfig) -> Result<Option<DbClient>, DbError> {
        match config.database.as_ref() {
            Some(db_config) => {
                debug!("Creating database client from application configuration");
                DbClient::from_config(db_config).await.map(Some)
            }
            None => Ok(None),
        }
    }

    /// Connect using a database URL.
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }
}

impl Default for DbClientFactory {
    fn default() -> Self {
        Self::new()
    }
}
