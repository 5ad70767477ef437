//! Factory for creating form submission repositories

use crate::repositories::form_submission_sql::SqlFormSubmissionRepository;
use crate::{DbClient, RepositoryFactory};

#[derive(Debug, Clone, Default)]
pub struct FormSubmissionRepositoryFactory;

impl FormSubmissionRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlFormSubmissionRepository, DbClient> for FormSubmissionRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlFormSubmissionRepository {
        SqlFormSubmissionRepository::new(db_client)
    }
}
