//! In-memory form submission repository
//!
//! Used when no database is configured and by handler tests. Nothing
//! survives a restart.

use crate::error::DbError;
use crate::repositories::form_submission::{
    FormSubmission, FormSubmissionRepository, NewFormSubmission,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct InMemoryFormSubmissionRepository {
    records: Arc<RwLock<Vec<FormSubmission>>>,
}

impl InMemoryFormSubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl FormSubmissionRepository for InMemoryFormSubmissionRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create(&self, submission: NewFormSubmission) -> Result<FormSubmission, DbError> {
        let record = FormSubmission::from_new(submission);
        debug!("Storing {} submission {} in memory", record.form_type, record.id);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FormSubmission>, DbError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<FormSubmission>, DbError> {
        Ok(self.records.read().await.clone())
    }
}
