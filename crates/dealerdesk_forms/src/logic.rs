use chrono::{DateTime, SecondsFormat, Utc};
use dealerdesk_common::{internal_error, validation_error, DealerDeskError};
use dealerdesk_db::{DbError, FormSubmissionRepository, FormType, NewFormSubmission};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Customer fields that must be non-empty strings, checked in this order.
pub const REQUIRED_CUSTOMER_FIELDS: [&str; 7] = [
    "name", "company", "email", "phone", "location", "type", "status",
];

/// Vehicle fields that must be non-empty strings, checked in this order.
pub const REQUIRED_VEHICLE_FIELDS: [&str; 3] = ["make", "model", "contactEmail"];

// --- Request / Response Structs ---

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VehicleSubmissionRequest {
    /// "VEHICLE_UPDATE" marks an edit; anything else is a new listing.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub submission_type: Option<Value>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub payload: Value,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CustomerSubmissionRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub payload: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: String,
    pub form_type: FormType,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    pub error: String,
}

// --- Error Enum ---
#[derive(Error, Debug)]
pub enum FormError {
    #[error("{0}")]
    Validation(String),
    #[error("Unable to save {subject} form submission")]
    Storage {
        subject: &'static str,
        #[source]
        source: DbError,
    },
}

impl From<FormError> for DealerDeskError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(msg) => validation_error(msg),
            storage @ FormError::Storage { .. } => internal_error(storage),
        }
    }
}

// --- Validation ---

fn is_non_empty_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.trim().is_empty())
}

fn require_object(payload: Value) -> Result<Map<String, Value>, FormError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(FormError::Validation("payload must be an object".to_string())),
    }
}

fn require_fields(payload: &Map<String, Value>, fields: &[&str]) -> Result<(), FormError> {
    match fields
        .iter()
        .find(|field| !is_non_empty_string(payload.get(**field)))
    {
        Some(field) => Err(FormError::Validation(format!("{} is required", field))),
        None => Ok(()),
    }
}

fn timestamp(submitted_at: DateTime<Utc>) -> Value {
    Value::String(submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Validate a vehicle submission and build the record to store.
///
/// `features` is normalised to an array and `submittedAt` is stamped.
pub fn prepare_vehicle_submission(
    request: VehicleSubmissionRequest,
    submitted_at: DateTime<Utc>,
) -> Result<NewFormSubmission, FormError> {
    let mut payload = require_object(request.payload)?;
    require_fields(&payload, &REQUIRED_VEHICLE_FIELDS)?;

    let form_type = match request.submission_type.as_ref().and_then(Value::as_str) {
        Some("VEHICLE_UPDATE") => FormType::VehicleUpdate,
        _ => FormType::VehicleListing,
    };

    if !matches!(payload.get("features"), Some(Value::Array(_))) {
        payload.insert("features".to_string(), Value::Array(Vec::new()));
    }
    payload.insert("submittedAt".to_string(), timestamp(submitted_at));

    Ok(NewFormSubmission::new(form_type, Value::Object(payload)))
}

/// Validate a customer submission and build the record to store.
pub fn prepare_customer_submission(
    request: CustomerSubmissionRequest,
    submitted_at: DateTime<Utc>,
) -> Result<NewFormSubmission, FormError> {
    let mut payload = require_object(request.payload)?;
    require_fields(&payload, &REQUIRED_CUSTOMER_FIELDS)?;
    payload.insert("submittedAt".to_string(), timestamp(submitted_at));

    Ok(NewFormSubmission::new(
        FormType::CustomerCreate,
        Value::Object(payload),
    ))
}

// --- Main Logic ---

async fn store<R: FormSubmissionRepository>(
    repository: &R,
    submission: NewFormSubmission,
    subject: &'static str,
) -> Result<SubmissionResponse, FormError> {
    match repository.create(submission).await {
        Ok(record) => {
            info!("Recorded {} submission {}", record.form_type, record.id);
            Ok(SubmissionResponse {
                id: record.id,
                form_type: record.form_type,
            })
        }
        Err(source) => {
            error!("Failed to save {} form submission: {}", subject, source);
            Err(FormError::Storage { subject, source })
        }
    }
}

pub async fn submit_vehicle_logic<R: FormSubmissionRepository>(
    repository: &R,
    request: VehicleSubmissionRequest,
) -> Result<SubmissionResponse, FormError> {
    let submission = prepare_vehicle_submission(request, Utc::now())?;
    store(repository, submission, "vehicle").await
}

pub async fn submit_customer_logic<R: FormSubmissionRepository>(
    repository: &R,
    request: CustomerSubmissionRequest,
) -> Result<SubmissionResponse, FormError> {
    let submission = prepare_customer_submission(request, Utc::now())?;
    store(repository, submission, "customer").await
}
