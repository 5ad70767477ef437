//! SQL implementation of the form submission repository

use crate::error::DbError;
use crate::repositories::form_submission::{
    FormSubmission, FormSubmissionRepository, NewFormSubmission,
};
use crate::DbClient;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the form submission repository
#[derive(Debug, Clone)]
pub struct SqlFormSubmissionRepository {
    db_client: DbClient,
}

impl SqlFormSubmissionRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }
}

// DateTime<Utc> and JSON do not decode through sqlx::Any, so both are stored as TEXT.
fn row_to_submission(row: &AnyRow) -> Result<FormSubmission, DbError> {
    let id: String = row.try_get("id")?;
    let form_type: String = row.try_get("form_type")?;
    let payload: String = row.try_get("payload")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(FormSubmission {
        id,
        form_type: form_type.parse()?,
        payload: serde_json::from_str(&payload)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| DbError::DecodeError(format!("created_at '{}': {}", created_at, e)))?
            .with_timezone(&Utc),
    })
}

impl FormSubmissionRepository for SqlFormSubmissionRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing form submission schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS form_submissions (
                id TEXT PRIMARY KEY,
                form_type TEXT NOT NULL,
                payload TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Form submission schema initialized successfully");
        Ok(())
    }

    async fn create(&self, submission: NewFormSubmission) -> Result<FormSubmission, DbError> {
        let record = FormSubmission::from_new(submission);
        debug!("Storing {} submission {}", record.form_type, record.id);

        let payload = serde_json::to_string(&record.payload)?;
        let created_at = record
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        sqlx::query(
            r#"
            INSERT INTO form_submissions (id, form_type, payload, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.clone())
        .bind(record.form_type.as_str().to_string())
        .bind(payload)
        .bind(created_at)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert form submission: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        info!("Stored {} submission {}", record.form_type, record.id);
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FormSubmission>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT id, form_type, payload, created_at
            FROM form_submissions
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to query form submission {}: {}", id, e);
            DbError::QueryError(e.to_string())
        })?;

        row.as_ref().map(row_to_submission).transpose()
    }

    async fn find_all(&self) -> Result<Vec<FormSubmission>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, form_type, payload, created_at
            FROM form_submissions
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to list form submissions: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        rows.iter().map(row_to_submission).collect()
    }
}
