//! HTTP server for the DealerDesk form submission API.

pub mod app_state;
pub mod server;

pub use app_state::{AppState, SubmissionStore};
pub use server::{build_router, cors_layer, serve, shutdown_signal, MAX_BODY_BYTES};
