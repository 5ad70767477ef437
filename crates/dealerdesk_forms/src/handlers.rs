use crate::logic::{
    submit_customer_logic, submit_vehicle_logic, CustomerSubmissionRequest, SubmissionResponse,
    VehicleSubmissionRequest,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use dealerdesk_common::{validation_error, DealerDeskError};
use dealerdesk_db::FormSubmissionRepository;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

// State for form handlers
#[derive(Clone)]
pub struct FormsState<R> {
    pub repository: R,
}

/// Body decoding mirrors a lenient JSON body parser: a missing or non-JSON
/// content type reads as an empty request (so validation reports the missing
/// payload), a body over the size limit is a 413 and malformed JSON is a 400.
fn decode_body<T>(body: Result<Json<Value>, JsonRejection>) -> Result<T, DealerDeskError>
where
    T: DeserializeOwned + Default,
{
    let value = match body {
        Ok(Json(value)) => value,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(DealerDeskError::PayloadTooLarge(rejection.body_text()));
        }
        Err(rejection) => {
            debug!("Rejected form body: {}", rejection.body_text());
            return Err(validation_error(rejection.body_text()));
        }
    };

    // Any JSON that is not an object carries no payload.
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub async fn submit_vehicle_handler<R>(
    State(state): State<Arc<FormsState<R>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionResponse>), DealerDeskError>
where
    R: FormSubmissionRepository + Clone + Send + Sync + 'static,
{
    let request: VehicleSubmissionRequest = decode_body(body)?;
    let response = submit_vehicle_logic(&state.repository, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn submit_customer_handler<R>(
    State(state): State<Arc<FormsState<R>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionResponse>), DealerDeskError>
where
    R: FormSubmissionRepository + Clone + Send + Sync + 'static,
{
    let request: CustomerSubmissionRequest = decode_body(body)?;
    let response = submit_customer_logic(&state.repository, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
