//! Form submission audit storage for DealerDesk
//!
//! Built on SQLx's `Any` driver so the same code runs against SQLite
//! (default feature), PostgreSQL or MySQL.
//!
//! # Example
//!
//! ```rust,no_run
//! use dealerdesk_db::{
//!     DbClient, FormSubmissionRepository, FormSubmissionRepositoryFactory, FormType,
//!     NewFormSubmission, RepositoryFactory,
//! };
//!
//! async fn store() -> Result<(), dealerdesk_db::error::DbError> {
//!     let client = DbClient::from_url("sqlite://data/dealerdesk.db").await?;
//!     let repo = FormSubmissionRepositoryFactory::new().create_repository(client);
//!     repo.init_schema().await?;
//!     repo.create(NewFormSubmission::new(
//!         FormType::CustomerCreate,
//!         serde_json::json!({ "name": "Ada Okafor" }),
//!     ))
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

#[cfg(test)]
mod form_submission_test;

pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

pub use repositories::{
    FormSubmission, FormSubmissionRepository, FormSubmissionRepositoryFactory, FormType,
    InMemoryFormSubmissionRepository, NewFormSubmission, SqlFormSubmissionRepository,
};
