use thiserror::Error;

/// Shown while the store cannot load its initial data.
pub const BOOTSTRAP_FAILED_MESSAGE: &str = "Unable to load CRM data. Please try again.";

/// Errors surfaced by the aggregate store and its ports.
///
/// `Display` is the text shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrmError {
    /// The form API rejected a field (HTTP 400); carries the server's message.
    #[error("{0}")]
    Validation(String),

    /// The form API could not be reached at all.
    #[error("Unable to reach form submission API at {base_url}. Please ensure the server is running and accessible.")]
    Transport { base_url: String },

    /// Any other non-success response.
    #[error("{0}")]
    Server(String),

    /// A mutation was attempted without the dealership context it needs.
    #[error("{0}")]
    Precondition(String),

    /// One of the initial fetches failed.
    #[error("Unable to load CRM data. Please try again.")]
    Bootstrap { cause: Box<CrmError> },

    /// A single data provider fetch failed.
    #[error("Data provider failed to load {resource}: {message}")]
    Provider { resource: String, message: String },
}

impl CrmError {
    pub fn precondition(message: impl Into<String>) -> Self {
        CrmError::Precondition(message.into())
    }

    pub fn provider(resource: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CrmError::Provider {
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}
