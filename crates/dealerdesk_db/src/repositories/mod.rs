//! Repository modules for database access

pub mod form_submission;
pub mod form_submission_factory;
pub mod form_submission_memory;
pub mod form_submission_sql;

pub use form_submission::{FormSubmission, FormSubmissionRepository, FormType, NewFormSubmission};
pub use form_submission_factory::FormSubmissionRepositoryFactory;
pub use form_submission_memory::InMemoryFormSubmissionRepository;
pub use form_submission_sql::SqlFormSubmissionRepository;
