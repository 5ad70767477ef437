use axum::{routing::post, Router};
use dealerdesk_db::FormSubmissionRepository;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{submit_customer_handler, submit_vehicle_handler, FormsState};

/// Form submission routes, relative to `/api`.
pub fn routes<R>(repository: R) -> Router
where
    R: FormSubmissionRepository + Clone + Send + Sync + 'static,
{
    info!("Registering form submission routes");
    let state = Arc::new(FormsState { repository });

    Router::new()
        .route("/forms/vehicle", post(submit_vehicle_handler::<R>))
        .route("/forms/customer", post(submit_customer_handler::<R>))
        .with_state(state)
}
