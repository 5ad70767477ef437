use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{DealerDeskError, HttpStatusCode};

// Include the client module
pub mod client;

impl IntoResponse for DealerDeskError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Clients read the message from a flat `error` string.
        let body = Json(json!({ "error": self.public_message() }));

        (status_code, body).into_response()
    }
}

/// Extracts the human readable message from an error body.
///
/// Returns `None` when the body is not JSON or has no string `error` field.
pub fn error_message_from_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}
