// Declare modules within this crate
pub mod error; // Error handling
pub mod handlers; // Shared HTTP handlers
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared response types
pub mod routes; // Route definitions

// Re-export the routes function to be used by the backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, internal_error, not_found, validation_error, DealerDeskError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, error_message_from_body};

// Re-export logging utilities for easier access
pub use logging::{init, log_error};
