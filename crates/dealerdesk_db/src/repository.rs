//! Repository factory trait
//!
//! Lets services build a concrete repository from whatever backing client
//! they were configured with, without naming the implementation.

/// A factory for creating repository instances of type `R` from a
/// configuration or client of type `C`.
pub trait RepositoryFactory<R, C> {
    fn create_repository(&self, config: C) -> R;
}
