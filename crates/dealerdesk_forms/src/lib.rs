#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;


pub use handlers::FormsState;
pub use logic::{FormError, SubmissionResponse};
pub use routes::routes;
