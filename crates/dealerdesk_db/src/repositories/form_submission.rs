//! Audit records of form submissions
//!
//! Every accepted vehicle or customer form is stored verbatim (as JSON) with
//! the kind of form it was and when it arrived. Records are append-only.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// The kind of form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormType {
    VehicleListing,
    VehicleUpdate,
    CustomerCreate,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::VehicleListing => "VEHICLE_LISTING",
            FormType::VehicleUpdate => "VEHICLE_UPDATE",
            FormType::CustomerCreate => "CUSTOMER_CREATE",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VEHICLE_LISTING" => Ok(FormType::VehicleListing),
            "VEHICLE_UPDATE" => Ok(FormType::VehicleUpdate),
            "CUSTOMER_CREATE" => Ok(FormType::CustomerCreate),
            other => Err(DbError::DecodeError(format!("unknown form type '{}'", other))),
        }
    }
}

/// A submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFormSubmission {
    pub form_type: FormType,
    pub payload: serde_json::Value,
}

impl NewFormSubmission {
    pub fn new(form_type: FormType, payload: serde_json::Value) -> Self {
        Self { form_type, payload }
    }
}

/// A stored submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    /// UUID v4 assigned on insert
    pub id: String,
    pub form_type: FormType,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl FormSubmission {
    /// Assign an id and creation time to a new submission.
    pub fn from_new(new: NewFormSubmission) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            form_type: new.form_type,
            payload: new.payload,
            created_at: Utc::now(),
        }
    }
}

/// Storage for form submission audit records.
///
/// Implementations must be cheap to clone; handlers hold one per router.
pub trait FormSubmissionRepository {
    /// Create the backing table if it does not exist.
    fn init_schema(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Store a submission, returning it with its assigned id and timestamp.
    fn create(
        &self,
        submission: NewFormSubmission,
    ) -> impl Future<Output = Result<FormSubmission, DbError>> + Send;

    /// Find a submission by id.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<FormSubmission>, DbError>> + Send;

    /// All submissions, oldest first.
    fn find_all(&self) -> impl Future<Output = Result<Vec<FormSubmission>, DbError>> + Send;
}
