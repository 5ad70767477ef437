//! Boundaries to the collaborators the store depends on.
//!
//! The traits return boxed futures so they can be held as `Arc<dyn ...>` and
//! swapped at startup (mock provider, HTTP client, test doubles).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

use crate::aggregates::{
    CustomerDashboardData, DashboardData, DocumentVaultData, ReportsData, SalesAnalyticsData,
};
use crate::error::CrmError;
use crate::models::{Customer, Dealership};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E = CrmError> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Source of the data loaded at startup.
///
/// Every call returns an independent copy: mutating the result can never
/// change what a later call returns.
pub trait DataProvider: Send + Sync {
    fn fetch_dealerships(&self) -> BoxFuture<'_, Vec<Dealership>>;

    fn fetch_customers(&self) -> BoxFuture<'_, Vec<Customer>>;

    fn fetch_dashboard(&self) -> BoxFuture<'_, DashboardData>;

    fn fetch_customer_dashboard(&self) -> BoxFuture<'_, CustomerDashboardData>;

    fn fetch_sales_analytics(&self) -> BoxFuture<'_, SalesAnalyticsData>;

    fn fetch_document_vault(&self) -> BoxFuture<'_, DocumentVaultData>;

    fn fetch_reports(&self) -> BoxFuture<'_, ReportsData>;
}

/// Which vehicle form a submission represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionKind {
    VehicleListing,
    VehicleUpdate,
}

/// What the form API returns for a stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: String,
    pub form_type: String,
}

/// Sink that records a form before its effect is applied locally.
///
/// Implementations fail with [`CrmError::Transport`], [`CrmError::Validation`]
/// or [`CrmError::Server`]; they never drop a submission silently.
pub trait FormSubmission: Send + Sync {
    fn submit_vehicle(&self, payload: Value, kind: SubmissionKind) -> BoxFuture<'_, SubmissionReceipt>;

    fn submit_customer(&self, payload: Value) -> BoxFuture<'_, SubmissionReceipt>;
}

/// Blocking yes/no decision taken before a destructive local change.
pub trait ConfirmationGate {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
