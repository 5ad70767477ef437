//! Client-side core of the DealerDesk CRM.
//!
//! [`store::AggregateStore`] holds dealerships, customers and notifications
//! and is the only place they change. Mutations are recorded through a
//! [`ports::FormSubmission`] before they are applied locally.
//! [`views::DerivedViews`] projects the state for screens and search, and
//! [`app::CrmApp`] ties both to the selected view.

pub mod aggregates;
pub mod app;
pub mod clock;
pub mod error;
pub mod models;
pub mod ports;
pub mod provider;
pub mod search;
pub mod store;
pub mod submission;
pub mod views;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod store_proptest;
#[cfg(test)]
mod views_test;

pub use app::{CrmApp, Screen, View};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CrmError;
pub use ports::{ConfirmationGate, DataProvider, FormSubmission, SubmissionKind, SubmissionReceipt};
pub use provider::{DataProviderKind, MockDataProvider};
pub use store::{AggregateStore, BootstrapStatus, StoreSnapshot};
pub use submission::HttpFormSubmissionClient;
pub use views::{DashboardStats, DerivedViews, InventoryStats};
