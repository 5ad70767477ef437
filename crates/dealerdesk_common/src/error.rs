use std::fmt;
use thiserror::Error;

/// The base error type for all DealerDesk errors.
///
/// Each crate can extend this by implementing `From<SpecificError>` for
/// `DealerDeskError`. The wrapped message is what reaches API clients in the
/// `{"error": "..."}` body, so it must be safe to show to a user.
#[derive(Error, Debug)]
pub enum DealerDeskError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A required field was missing or empty
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The request body exceeded the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DealerDeskError {
    /// The message placed in the HTTP error body.
    ///
    /// This is the wrapped message without the category prefix used by
    /// `Display`, so a validation failure reads exactly "make is required".
    pub fn public_message(&self) -> String {
        match self {
            DealerDeskError::ConfigError(msg)
            | DealerDeskError::ValidationError(msg)
            | DealerDeskError::DatabaseError(msg)
            | DealerDeskError::PayloadTooLarge(msg)
            | DealerDeskError::NotFoundError(msg)
            | DealerDeskError::InternalError(msg) => msg.clone(),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DealerDeskError {
    fn status_code(&self) -> u16 {
        match self {
            DealerDeskError::ConfigError(_) => 500,
            DealerDeskError::ValidationError(_) => 400,
            DealerDeskError::DatabaseError(_) => 500,
            DealerDeskError::PayloadTooLarge(_) => 413,
            DealerDeskError::NotFoundError(_) => 404,
            DealerDeskError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<std::io::Error> for DealerDeskError {
    fn from(err: std::io::Error) -> Self {
        DealerDeskError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> DealerDeskError {
    DealerDeskError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> DealerDeskError {
    DealerDeskError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> DealerDeskError {
    DealerDeskError::NotFoundError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> DealerDeskError {
    DealerDeskError::InternalError(message.to_string())
}
