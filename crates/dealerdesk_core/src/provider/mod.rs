//! Data provider implementations and their selection by configuration key.

mod mock;

pub use mock::MockDataProvider;

use std::sync::Arc;
use tracing::{info, warn};

use crate::ports::DataProvider;

/// The data providers that can back the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataProviderKind {
    /// Bundled fixture data.
    #[default]
    Mock,
}

impl DataProviderKind {
    /// Resolve a configuration key such as `client.data_provider`.
    ///
    /// Keys are case-insensitive. An unknown key falls back to the mock
    /// provider with a warning.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "mock" => DataProviderKind::Mock,
            other => {
                warn!("Unknown data provider '{}', using mock data", other);
                DataProviderKind::Mock
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DataProviderKind::Mock => "mock",
        }
    }

    /// Build the provider. Called once at startup.
    pub fn build(&self) -> Arc<dyn DataProvider> {
        info!("Using '{}' data provider", self.key());
        match self {
            DataProviderKind::Mock => Arc::new(MockDataProvider::new()),
        }
    }
}
