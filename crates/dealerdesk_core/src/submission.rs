//! HTTP client for the form submission API.

use dealerdesk_common::{error_message_from_body, HTTP_CLIENT};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CrmError;
use crate::ports::{BoxFuture, FormSubmission, SubmissionKind, SubmissionReceipt};

pub const VEHICLE_FORM_PATH: &str = "/api/forms/vehicle";
pub const CUSTOMER_FORM_PATH: &str = "/api/forms/customer";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleSubmissionBody {
    submission_type: SubmissionKind,
    payload: Value,
}

#[derive(Serialize)]
struct CustomerSubmissionBody {
    payload: Value,
}

/// [`FormSubmission`] over HTTP, one attempt per call and no retries.
#[derive(Debug, Clone)]
pub struct HttpFormSubmissionClient {
    base_url: String,
    client: Client,
}

impl HttpFormSubmissionClient {
    /// Uses the shared HTTP client. A trailing `/` on the base URL is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, HTTP_CLIENT.clone())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<SubmissionReceipt, CrmError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!("Form submission request to {} failed: {}", url, err);
                CrmError::Transport {
                    base_url: self.base_url.clone(),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SubmissionReceipt>()
                .await
                .map_err(|err| CrmError::Server(format!("Invalid response from {}: {}", path, err)));
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(error_for_status(path, status, &body))
    }
}

/// Build the error for a non-success response.
///
/// A JSON body with a string `error` supplies the message. A body that is not
/// JSON reads as "Unknown server error"; JSON without a usable `error` gives a
/// message naming the path and status.
pub(crate) fn error_for_status(path: &str, status: StatusCode, body: &[u8]) -> CrmError {
    let message = match error_message_from_body(body) {
        Some(message) => message,
        None if serde_json::from_slice::<Value>(body).is_err() => "Unknown server error".to_string(),
        None => format!("Request to {} failed with status {}", path, status.as_u16()),
    };

    if status == StatusCode::BAD_REQUEST {
        CrmError::Validation(message)
    } else {
        CrmError::Server(message)
    }
}

impl FormSubmission for HttpFormSubmissionClient {
    fn submit_vehicle(&self, payload: Value, kind: SubmissionKind) -> BoxFuture<'_, SubmissionReceipt> {
        Box::pin(async move {
            let body = VehicleSubmissionBody {
                submission_type: kind,
                payload,
            };
            self.post_json(VEHICLE_FORM_PATH, &body).await
        })
    }

    fn submit_customer(&self, payload: Value) -> BoxFuture<'_, SubmissionReceipt> {
        Box::pin(async move {
            let body = CustomerSubmissionBody { payload };
            self.post_json(CUSTOMER_FORM_PATH, &body).await
        })
    }
}
