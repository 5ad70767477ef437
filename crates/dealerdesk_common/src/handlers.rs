use axum::Json;

use crate::models::HealthResponse;

/// Liveness probe. Always answers `{"status":"ok"}` while the process serves.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "Health"
))]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
